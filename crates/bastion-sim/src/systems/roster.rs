//! Enemy roster captured at the start of a tick.
//!
//! Targeting and projectile resolution both read this frozen view, so
//! spawns and movement earlier in the same tick are invisible to them.

use std::collections::HashMap;

use glam::DVec3;
use hecs::{Entity, World};

use bastion_core::components::{Enemy, Position};

#[derive(Debug, Default)]
pub struct EnemyRoster {
    /// World iteration order; the order targeting ties are broken in.
    entries: Vec<(Entity, DVec3)>,
    index: HashMap<Entity, usize>,
}

impl EnemyRoster {
    pub fn capture(world: &World) -> Self {
        let entries: Vec<(Entity, DVec3)> = world
            .query::<(&Enemy, &Position)>()
            .iter()
            .map(|(entity, (_enemy, pos))| (entity, pos.0))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (entity, _))| (*entity, i))
            .collect();
        Self { entries, index }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, DVec3)> + '_ {
        self.entries.iter().copied()
    }

    /// Position of an enemy at tick start, None if it was not alive then.
    pub fn position_of(&self, entity: Entity) -> Option<DVec3> {
        self.index.get(&entity).map(|&i| self.entries[i].1)
    }
}
