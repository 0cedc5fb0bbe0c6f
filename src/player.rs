//! The player's ship: movement, both weapons, the guard resource and HP.
//!
//! Every operation takes the current game-clock time in milliseconds instead
//! of reading a wall clock.  Refused actions are silent no-ops.

use tracing::debug;

use crate::constants::{
    BULLET_SPEED, GUARD_BREAK_COOLDOWN, GUARD_HIT_COST, GUARD_MAX, GUARD_REGEN_PER_SEC, MAX_HP,
    PLAYER_MUZZLE_OFFSET, SHOOT_DELAY, SHOTGUN_ANGLES, SHOTGUN_COST,
};
use crate::entities::{Arena, Entity, EntityKind};

/// What `apply_hit` did with an incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Player already dead or invincible.
    Ignored,
    /// The guard soaked the hit.  `broke` is set when it was emptied.
    Absorbed { broke: bool },
    /// One HP lost, still alive.
    Damaged,
    /// Last HP lost.
    Killed,
}

#[derive(Clone, Debug)]
pub struct PlayerController {
    pub body: Entity,
    pub alive: bool,
    /// No hit extends this; it stays 0 unless set directly.
    pub invincible_until: u64,
    pub last_shot: Option<u64>,
    pub guarding: bool,
    /// Always within `[0, GUARD_MAX]`.
    pub guard: f32,
    pub guard_cd_until: u64,
    last_guard_tick: u64,
}

impl PlayerController {
    pub fn new(x: f32, y: f32, now: u64) -> Self {
        PlayerController {
            body: Entity::new(EntityKind::Player, x, y, MAX_HP),
            alive: true,
            invincible_until: 0,
            last_shot: None,
            guarding: false,
            guard: GUARD_MAX,
            guard_cd_until: 0,
            last_guard_tick: now,
        }
    }

    pub fn hp(&self) -> u32 {
        self.body.hp
    }

    pub fn x(&self) -> f32 {
        self.body.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    /// True once the break cooldown has elapsed.
    pub fn guard_ready(&self, now: u64) -> bool {
        now >= self.guard_cd_until
    }

    pub fn is_invincible(&self, now: u64) -> bool {
        now < self.invincible_until
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    /// Displace the ship, then clamp it `MARGIN` inside the arena.
    pub fn move_by(&mut self, dx: f32, dy: f32, arena: &Arena) {
        if !self.alive {
            return;
        }
        self.body.x = arena.clamp_x(self.body.x + dx);
        self.body.y = arena.clamp_y(self.body.y + dy);
    }

    // ── Weapons ──────────────────────────────────────────────────────────────

    /// Single straight shot, rate-limited by `SHOOT_DELAY`.
    pub fn fire_primary(&mut self, now: u64) -> Option<Entity> {
        if !self.alive || self.guarding {
            return None;
        }
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) < SHOOT_DELAY {
                return None;
            }
        }
        self.last_shot = Some(now);
        Some(self.muzzle_bullet(0.0))
    }

    /// Five-way burst paid for with guard.
    pub fn fire_shotgun(&mut self, now: u64) -> Vec<Entity> {
        if !self.alive || self.guarding || !self.guard_ready(now) || self.guard < SHOTGUN_COST {
            return Vec::new();
        }
        self.guard -= SHOTGUN_COST;
        SHOTGUN_ANGLES
            .iter()
            .map(|&angle| self.muzzle_bullet(angle))
            .collect()
    }

    fn muzzle_bullet(&self, angle_deg: f32) -> Entity {
        Entity::bullet(
            EntityKind::PlayerBullet,
            self.body.x,
            self.body.y - PLAYER_MUZZLE_OFFSET,
            angle_deg,
            BULLET_SPEED,
        )
    }

    // ── Guard ────────────────────────────────────────────────────────────────

    /// Raise or lower the guard.  Raising fails (and leaves the guard down)
    /// while dead, in break cooldown, or with an empty guard.  Returns the
    /// resulting guarding state.
    pub fn set_guard(&mut self, on: bool, now: u64) -> bool {
        self.guarding = on && self.alive && self.guard_ready(now) && self.guard > 0.0;
        self.guarding
    }

    /// Regenerate for the time elapsed since the previous call.  Elapsed time
    /// spent guarding or in break cooldown is forfeited, not banked.
    pub fn regen_guard(&mut self, now: u64) {
        let dt = now.saturating_sub(self.last_guard_tick);
        self.last_guard_tick = now;
        if self.guard >= GUARD_MAX {
            self.guard = GUARD_MAX;
            return;
        }
        if self.guarding || !self.guard_ready(now) {
            return;
        }
        let add = GUARD_REGEN_PER_SEC * dt as f32 / 1000.0;
        self.guard = (self.guard + add).min(GUARD_MAX);
    }

    // ── Damage ───────────────────────────────────────────────────────────────

    pub fn apply_hit(&mut self, now: u64) -> HitOutcome {
        if !self.alive {
            return HitOutcome::Ignored;
        }

        if self.guarding && self.guard > 0.0 && self.guard_ready(now) {
            self.guard -= GUARD_HIT_COST;
            let broke = self.guard <= 0.0;
            if broke {
                self.guard = 0.0;
                self.guarding = false;
                self.guard_cd_until = now + GUARD_BREAK_COOLDOWN;
                debug!(until = self.guard_cd_until, "guard broken");
            }
            return HitOutcome::Absorbed { broke };
        }

        if self.is_invincible(now) {
            return HitOutcome::Ignored;
        }

        self.body.hp = self.body.hp.saturating_sub(1);
        if self.body.hp == 0 {
            self.alive = false;
            self.guarding = false;
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }
}
