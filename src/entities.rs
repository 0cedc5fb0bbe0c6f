//! All game entity types — pure data, no behaviour beyond simple accessors.

use crate::constants::{
    BOSS_SCORE, ENEMY_BULLET_HIT, ENEMY_HIT, GRUNT_SCORE, HEAVY_SCORE, MARGIN, PLAYER_BULLET_HIT,
    PLAYER_HIT,
};

// ── Arena ─────────────────────────────────────────────────────────────────────

/// The playing field.  Origin is top-left, y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp `x` into `[MARGIN, width - MARGIN]`.
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.max(MARGIN).min(self.width - MARGIN)
    }

    /// Clamp `y` into `[MARGIN, height - MARGIN]`.
    pub fn clamp_y(&self, y: f32) -> f32 {
        y.max(MARGIN).min(self.height - MARGIN)
    }

    /// True once a point is more than `MARGIN` outside the arena on any side.
    pub fn is_far_outside(&self, x: f32, y: f32) -> bool {
        x < -MARGIN || x > self.width + MARGIN || y < -MARGIN || y > self.height + MARGIN
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable handle the renderer binds sprites to.  `EntityId::UNASSIGNED`
/// marks an entity that has not been inserted into a collection yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// Hands out ids; shared by every owner in one session so ids never collide.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn next(&mut self) -> EntityId {
        self.last += 1;
        EntityId(self.last)
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    One,
    Two,
}

/// What an entity is.  The boss carries its phase; every other kind is a
/// plain tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Grunt,
    Heavy,
    Boss(BossPhase),
    PlayerBullet,
    EnemyBullet,
}

impl EntityKind {
    /// Hit radius as a fraction of `UNIT`.
    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Player => PLAYER_HIT,
            EntityKind::Grunt | EntityKind::Heavy | EntityKind::Boss(_) => ENEMY_HIT,
            EntityKind::PlayerBullet => PLAYER_BULLET_HIT,
            EntityKind::EnemyBullet => ENEMY_BULLET_HIT,
        }
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Grunt | EntityKind::Heavy | EntityKind::Boss(_))
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EntityKind::Boss(_))
    }

    /// Score awarded for destroying an entity of this kind.
    pub fn kill_score(&self) -> u32 {
        match self {
            EntityKind::Boss(_) => BOSS_SCORE,
            EntityKind::Heavy => HEAVY_SCORE,
            EntityKind::Grunt => GRUNT_SCORE,
            _ => 0,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// A positional actor.  Velocity is the displacement applied per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub hp: u32,
    pub max_hp: u32,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f32, y: f32, hp: u32) -> Self {
        Entity {
            id: EntityId::UNASSIGNED,
            kind,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            hp,
            max_hp: hp,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// A projectile travelling at `speed` along `angle_deg`, where 0° points
    /// straight up for the player and straight down for enemies.
    pub fn bullet(kind: EntityKind, x: f32, y: f32, angle_deg: f32, speed: f32) -> Self {
        let r = angle_deg.to_radians();
        let vy = match kind {
            EntityKind::PlayerBullet => -r.cos() * speed,
            _ => r.cos() * speed,
        };
        Entity::new(kind, x, y, 1).with_velocity(r.sin() * speed, vy)
    }

    pub fn radius(&self) -> f32 {
        self.kind.radius()
    }

    pub fn boss_phase(&self) -> Option<BossPhase> {
        match self.kind {
            EntityKind::Boss(phase) => Some(phase),
            _ => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}
