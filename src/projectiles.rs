//! Every live bullet, player-owned and enemy-owned.

use crate::entities::{Arena, Entity, EntityId, EntityKind, IdAllocator};

#[derive(Clone, Debug, Default)]
pub struct ProjectileSet {
    pub player: Vec<Entity>,
    pub enemy: Vec<Entity>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.player.len() + self.enemy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_empty() && self.enemy.is_empty()
    }

    /// Stamp an id on `bullet` and file it under its owner.
    pub fn push(&mut self, mut bullet: Entity, ids: &mut IdAllocator) -> EntityId {
        bullet.id = ids.next();
        let id = bullet.id;
        if bullet.kind == EntityKind::PlayerBullet {
            self.player.push(bullet);
        } else {
            self.enemy.push(bullet);
        }
        id
    }

    /// Move every bullet by its velocity and return the ones that drifted
    /// more than `MARGIN` outside the arena (already removed).
    pub fn advance(&mut self, arena: &Arena) -> Vec<Entity> {
        let mut pruned = Vec::new();
        for list in [&mut self.player, &mut self.enemy] {
            for b in list.iter_mut() {
                b.x += b.vx;
                b.y += b.vy;
            }
            let (gone, kept): (Vec<Entity>, Vec<Entity>) = list
                .drain(..)
                .partition(|b| arena.is_far_outside(b.x, b.y));
            *list = kept;
            pruned.extend(gone);
        }
        pruned
    }

    /// Remove everything, returning what was live.
    pub fn clear(&mut self) -> Vec<Entity> {
        let mut all: Vec<Entity> = self.player.drain(..).collect();
        all.append(&mut self.enemy);
        all
    }
}
