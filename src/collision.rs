//! Circle-circle hit tests.  The only place damage originates.
//!
//! Projectiles carry no reference to a target: every tick each bullet is
//! matched geometrically against the entities it can hurt, in array order.

use crate::constants::UNIT;
use crate::entities::Entity;
use crate::wave::EnemyWave;

/// True when the hit circles of `a` and `b` touch or overlap.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    let ra = a.radius() * UNIT;
    let rb = b.radius() * UNIT;
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy <= (ra + rb) * (ra + rb)
}

/// A player bullet that connected with an enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyStruck {
    /// The bullet, already removed from its set.
    pub bullet: Entity,
    /// The enemy, if the hit destroyed it (already removed from the wave).
    pub killed: Option<Entity>,
}

/// Match every player bullet against the wave.  Each bullet resolves against
/// at most one enemy (the first in wave order); the enemy loses one HP and
/// is removed once it reaches zero.
pub fn resolve_player_fire(bullets: &mut Vec<Entity>, wave: &mut EnemyWave) -> Vec<EnemyStruck> {
    let mut struck = Vec::new();
    let mut bi = 0;
    while bi < bullets.len() {
        let target = wave
            .enemies()
            .iter()
            .position(|enemy| overlaps(&bullets[bi], enemy));
        match target {
            Some(ei) => {
                let bullet = bullets.remove(bi);
                let killed = wave.damage(ei);
                struck.push(EnemyStruck { bullet, killed });
            }
            None => bi += 1,
        }
    }
    struck
}

/// Remove and return every enemy bullet touching `player`.
pub fn resolve_enemy_fire(bullets: &mut Vec<Entity>, player: &Entity) -> Vec<Entity> {
    let (hits, misses): (Vec<Entity>, Vec<Entity>) =
        bullets.drain(..).partition(|b| overlaps(b, player));
    *bullets = misses;
    hits
}
