//! Fire control system: picks the nearest enemy in range for each tower
//! whose cooldown has elapsed and launches a projectile at it.

use glam::DVec3;
use hecs::{Entity, World};

use bastion_core::components::{Position, Tower};
use bastion_core::config::ConfigTables;
use bastion_core::events::SimEvent;
use bastion_core::stats::tower_stats;
use bastion_core::types::EntityId;

use crate::systems::roster::EnemyRoster;
use crate::world_setup;

/// A shot decided this tick, spawned once the tower query is released.
struct PendingShot {
    tower: Entity,
    origin: DVec3,
    target: EntityId,
    damage: f64,
    color: String,
}

/// Nearest enemy within `range` of `from`. Ties go to the first one seen.
pub fn nearest_in_range(roster: &EnemyRoster, from: DVec3, range: f64) -> Option<Entity> {
    let mut best: Option<(Entity, f64)> = None;
    for (entity, pos) in roster.iter() {
        let distance = from.distance(pos);
        if distance > range {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entity, distance)),
        }
    }
    best.map(|(entity, _)| entity)
}

/// Run fire control for one tick. Returns the number of shots fired.
pub fn run(
    world: &mut World,
    roster: &EnemyRoster,
    tables: &ConfigTables,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut shots: Vec<PendingShot> = Vec::new();

    for (entity, (tower, pos)) in world.query_mut::<(&mut Tower, &Position)>() {
        let Some(config) = tables.tower(tower.tower_type) else {
            continue;
        };
        let stats = tower_stats(config, tower.level);

        if let Some(last_fired) = tower.last_fired {
            if now - last_fired < stats.cooldown {
                continue;
            }
        }

        let Some(target) = nearest_in_range(roster, pos.0, stats.range) else {
            continue;
        };
        let target = world_setup::id_of(target);

        tower.target = Some(target);
        tower.last_fired = Some(now);
        shots.push(PendingShot {
            tower: entity,
            origin: pos.0,
            target,
            damage: stats.damage,
            color: config.color.clone(),
        });
    }

    let fired = shots.len();
    for shot in shots {
        world_setup::spawn_projectile(world, shot.origin, shot.target, shot.damage, shot.color);
        events.push(SimEvent::TowerFired {
            tower: world_setup::id_of(shot.tower),
            target: shot.target,
        });
    }
    fired
}
