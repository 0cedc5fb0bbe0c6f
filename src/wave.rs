//! Enemy waves: which enemies a stage spawns, how they drift, and when a
//! cleared stage advances to the next.

use rand::Rng;
use tracing::debug;

use crate::constants::{
    BOSS_ENRAGE_SPEED_BONUS, BOSS_ROW_Y, ENEMY_DOWN_SPEED, ESCORT_ROW_Y, LINE_ROW_Y, MARGIN,
    STAGE_LOCK,
};
use crate::entities::{Arena, BossPhase, Entity, EntityId, EntityKind, IdAllocator};

// ── Spawn rule ────────────────────────────────────────────────────────────────

/// The three stage layouts, cycled in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// A row of grunts with no horizontal drift.
    Line,
    /// Alternating grunts and heavies patrolling sideways.
    Patrol,
    /// A boss with a row of heavy escorts.
    Boss,
}

/// Everything a stage number decides about its wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StagePlan {
    pub stage: u32,
    pub pattern: Pattern,
    /// How many full pattern cycles precede this stage; scales difficulty.
    pub wave: u32,
}

impl StagePlan {
    pub fn for_stage(stage: u32) -> Self {
        let s = stage.max(1);
        let pattern = match (s - 1) % 3 {
            0 => Pattern::Line,
            1 => Pattern::Patrol,
            _ => Pattern::Boss,
        };
        StagePlan {
            stage: s,
            pattern,
            wave: (s - 1) / 3,
        }
    }

    /// Enemies in a line or patrol row.
    pub fn row_count(&self) -> u32 {
        3 + self.wave
    }

    /// Horizontal speed of patrolling grunts; heavies move one faster.
    pub fn patrol_speed(&self) -> f32 {
        (2 + self.wave) as f32
    }

    pub fn boss_hp(&self) -> u32 {
        6 + 2 * self.wave
    }

    pub fn boss_speed(&self) -> f32 {
        (1 + self.wave) as f32
    }

    pub fn escort_count(&self) -> u32 {
        2 + self.wave
    }

    /// Build the wave for this stage.  Ids are left unassigned; the only
    /// randomness is each moving enemy's initial direction.
    pub fn spawn(&self, arena: &Arena, rng: &mut impl Rng) -> Vec<Entity> {
        let column = |i: u32, n: u32| arena.clamp_x(arena.width * (i + 1) as f32 / (n + 1) as f32);
        let mut enemies = Vec::new();

        match self.pattern {
            Pattern::Line => {
                let n = self.row_count();
                for i in 0..n {
                    enemies.push(enemy(EntityKind::Grunt, column(i, n), LINE_ROW_Y, 1, 0.0, rng));
                }
            }
            Pattern::Patrol => {
                let n = self.row_count();
                let speed = self.patrol_speed();
                for i in 0..n {
                    let e = if i % 2 == 1 {
                        enemy(EntityKind::Heavy, column(i, n), LINE_ROW_Y, 2, speed + 1.0, rng)
                    } else {
                        enemy(EntityKind::Grunt, column(i, n), LINE_ROW_Y, 1, speed, rng)
                    };
                    enemies.push(e);
                }
            }
            Pattern::Boss => {
                enemies.push(enemy(
                    EntityKind::Boss(BossPhase::One),
                    arena.clamp_x(arena.width / 2.0),
                    BOSS_ROW_Y,
                    self.boss_hp(),
                    self.boss_speed(),
                    rng,
                ));
                let n = self.escort_count();
                let speed = self.patrol_speed() + 1.0;
                for i in 0..n {
                    enemies.push(enemy(EntityKind::Heavy, column(i, n), ESCORT_ROW_Y, 2, speed, rng));
                }
            }
        }
        enemies
    }
}

fn enemy(kind: EntityKind, x: f32, y: f32, hp: u32, speed: f32, rng: &mut impl Rng) -> Entity {
    let vx = if speed > 0.0 {
        if rng.gen_bool(0.5) {
            speed
        } else {
            -speed
        }
    } else {
        0.0
    };
    Entity::new(kind, x, y, hp).with_velocity(vx, ENEMY_DOWN_SPEED)
}

// ── Live wave ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct EnemyWave {
    enemies: Vec<Entity>,
}

impl EnemyWave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Take ownership of freshly spawned enemies, stamping their ids.
    pub fn populate(&mut self, spawned: Vec<Entity>, ids: &mut IdAllocator) {
        for mut e in spawned {
            e.id = ids.next();
            self.enemies.push(e);
        }
    }

    pub fn clear(&mut self) -> Vec<Entity> {
        self.enemies.drain(..).collect()
    }

    /// The first boss in the wave, if any.
    pub fn boss(&self) -> Option<&Entity> {
        self.enemies.iter().find(|e| e.kind.is_boss())
    }

    pub fn has_enraged_boss(&self) -> bool {
        self.enemies
            .iter()
            .any(|e| e.boss_phase() == Some(BossPhase::Two))
    }

    /// Drift every enemy one tick.  Enemies leaving the arena by more than
    /// `MARGIN` wrap to the opposite edge.  Returns the bosses that entered
    /// phase 2 during this tick.
    pub fn advance(&mut self, arena: &Arena) -> Vec<EntityId> {
        let mut enraged = Vec::new();
        for e in self.enemies.iter_mut() {
            if e.kind == EntityKind::Boss(BossPhase::One) && e.hp <= e.max_hp / 2 {
                e.kind = EntityKind::Boss(BossPhase::Two);
                e.vx += BOSS_ENRAGE_SPEED_BONUS * e.vx.signum();
                debug!(id = e.id.0, hp = e.hp, "boss entered phase 2");
                enraged.push(e.id);
            }

            if e.vx != 0.0 {
                e.x += e.vx;
                if e.x < -MARGIN {
                    e.x = arena.width + MARGIN;
                } else if e.x > arena.width + MARGIN {
                    e.x = -MARGIN;
                }
            }

            e.y += e.vy;
            if e.y > arena.height + MARGIN {
                e.y = -MARGIN;
            }
        }
        enraged
    }

    /// Take one HP from the enemy at `index`.  Returns it, removed from the
    /// wave, if that destroyed it.
    pub fn damage(&mut self, index: usize) -> Option<Entity> {
        let e = self.enemies.get_mut(index)?;
        e.hp = e.hp.saturating_sub(1);
        if e.is_dead() {
            Some(self.enemies.remove(index))
        } else {
            None
        }
    }
}

// ── Stage progression ─────────────────────────────────────────────────────────

/// Owns the stage counter and the short lock that stops one clear from
/// advancing twice.
#[derive(Clone, Debug)]
pub struct StageDirector {
    stage: u32,
    locked_until: Option<u64>,
}

impl Default for StageDirector {
    fn default() -> Self {
        StageDirector {
            stage: 1,
            locked_until: None,
        }
    }
}

impl StageDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn plan(&self) -> StagePlan {
        StagePlan::for_stage(self.stage)
    }

    /// Back to stage 1, unlocked.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_locked(&self, now: u64) -> bool {
        self.locked_until.map_or(false, |until| now < until)
    }

    /// A clear is due when the wave is empty and no advance is in flight.
    pub fn clear_due(&self, wave: &EnemyWave, now: u64) -> bool {
        wave.is_empty() && !self.is_locked(now)
    }

    /// Move to the next stage and lock further advances for `STAGE_LOCK`.
    pub fn advance(&mut self, now: u64) -> StagePlan {
        self.stage += 1;
        self.locked_until = Some(now + STAGE_LOCK);
        debug!(stage = self.stage, "stage advanced");
        self.plan()
    }
}
