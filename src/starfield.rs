//! Background decoration: stars falling at individual speeds, slowed while
//! the session is not in play.  Purely cosmetic; never touches gameplay.

use rand::Rng;

use crate::entities::Arena;

/// Speed factor applied while paused, waiting, or after game over.
pub const IDLE_DRIFT: f32 = 0.6;

const RESPAWN_GAP: f32 = 6.0;
const RADII: [u8; 6] = [1, 1, 1, 2, 2, 3];

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub radius: u8,
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, arena: &Arena, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..=arena.width),
                y: rng.gen_range(0.0..=arena.height),
                speed: rng.gen_range(0.7..3.6),
                radius: RADII[rng.gen_range(0..RADII.len())],
            })
            .collect();
        Starfield { stars }
    }

    /// Drift every star down by `speed * factor`; stars falling off the bottom
    /// reappear just above the top at a random column.
    pub fn update(&mut self, factor: f32, arena: &Arena, rng: &mut impl Rng) {
        for s in self.stars.iter_mut() {
            s.y += s.speed * factor;
            if s.y > arena.height + RESPAWN_GAP {
                s.y = -RESPAWN_GAP;
                s.x = rng.gen_range(0.0..=arena.width);
            }
        }
    }
}
