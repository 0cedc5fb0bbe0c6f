//! The enemy fire timer.  Independent of the simulation tick: it counts down
//! its own deadline and, when it expires during play, one random enemy shoots.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{
    BOSS_ENRAGED_SPREAD, BOSS_SPREAD, BULLET_SPEED, ENEMY_BASE_COOLDOWN, ENEMY_COOLDOWN_PER_WAVE,
    ENEMY_MUZZLE_OFFSET, ENRAGED_COOLDOWN_CUT, ENRAGED_COOLDOWN_FLOOR, FIRE_POLL_INTERVAL,
    GRUNT_SPREAD, HEAVY_SPREAD,
};
use crate::entities::{BossPhase, Entity, EntityKind};
use crate::wave::EnemyWave;

/// Phase of the owning session, as far as the timer cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireGate {
    /// Fire when due.
    Open,
    /// Paused or waiting: keep polling at `FIRE_POLL_INTERVAL`.
    Held,
    /// Session over: the registration lapses.
    Closed,
}

/// Holds at most one pending registration; arming replaces it.
#[derive(Clone, Debug, Default)]
pub struct EnemyFireController {
    pending_ms: Option<u64>,
}

impl EnemyFireController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the timer to fire on its next advance.
    pub fn arm(&mut self) {
        self.pending_ms = Some(0);
    }

    pub fn disarm(&mut self) {
        self.pending_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending_ms.is_some()
    }

    /// Milliseconds until the registration comes due.
    pub fn remaining_ms(&self) -> Option<u64> {
        self.pending_ms
    }

    /// Count the timer down by `dt_ms`.  Returns the bullets fired, if it came
    /// due with the gate open and an enemy alive.
    pub fn advance(
        &mut self,
        dt_ms: u64,
        gate: FireGate,
        stage: u32,
        wave: &EnemyWave,
        rng: &mut impl Rng,
    ) -> Vec<Entity> {
        let Some(remaining) = self.pending_ms else {
            return Vec::new();
        };
        let remaining = remaining.saturating_sub(dt_ms);
        if remaining > 0 {
            self.pending_ms = Some(remaining);
            return Vec::new();
        }

        match gate {
            FireGate::Closed => {
                self.pending_ms = None;
                Vec::new()
            }
            FireGate::Held => {
                self.pending_ms = Some(FIRE_POLL_INTERVAL);
                Vec::new()
            }
            FireGate::Open => {
                let volley = wave
                    .enemies()
                    .choose(rng)
                    .map(volley_from)
                    .unwrap_or_default();
                self.pending_ms = Some(cooldown_ms(stage, wave));
                volley
            }
        }
    }
}

/// Delay before the next shot: slower each pattern cycle, sharply faster
/// while any boss is in phase 2.
pub fn cooldown_ms(stage: u32, wave: &EnemyWave) -> u64 {
    let cooldown = ENEMY_BASE_COOLDOWN + (stage / 3) as u64 * ENEMY_COOLDOWN_PER_WAVE;
    if wave.has_enraged_boss() {
        cooldown
            .saturating_sub(ENRAGED_COOLDOWN_CUT)
            .max(ENRAGED_COOLDOWN_FLOOR)
    } else {
        cooldown
    }
}

/// Firing angles in degrees for `kind`; 0° is straight down.
pub fn spread_for(kind: EntityKind) -> &'static [f32] {
    match kind {
        EntityKind::Boss(BossPhase::Two) => &BOSS_ENRAGED_SPREAD,
        EntityKind::Boss(BossPhase::One) => &BOSS_SPREAD,
        EntityKind::Heavy => &HEAVY_SPREAD,
        _ => &GRUNT_SPREAD,
    }
}

/// The bullets `shooter` fires in one volley.
pub fn volley_from(shooter: &Entity) -> Vec<Entity> {
    spread_for(shooter.kind)
        .iter()
        .map(|&angle| {
            Entity::bullet(
                EntityKind::EnemyBullet,
                shooter.x,
                shooter.y + ENEMY_MUZZLE_OFFSET,
                angle,
                BULLET_SPEED,
            )
        })
        .collect()
}
