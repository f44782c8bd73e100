//! Projectile flight and hit resolution.
//!
//! Projectiles home on the tick-start position of their target. Damage from
//! every projectile landing this tick is summed per target and applied once,
//! so a target killed by several hits pays out and explodes exactly once.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{Enemy, Position, Projectile};
use bastion_core::constants::PROJECTILE_FLIGHT_RATE;
use bastion_core::events::SimEvent;

use crate::systems::roster::EnemyRoster;
use crate::world_setup;

/// Fly projectiles, resolve hits, remove the dead. Returns the reward earned.
pub fn run(
    world: &mut World,
    roster: &EnemyRoster,
    dt: f64,
    now: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) -> u32 {
    despawn_buffer.clear();
    let mut hits: HashMap<Entity, f64> = HashMap::new();

    for (entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        let target = world_setup::entity_of(projectile.target);
        let Some((target, target_pos)) =
            target.and_then(|t| roster.position_of(t).map(|p| (t, p)))
        else {
            // Target lost.
            despawn_buffer.push(entity);
            continue;
        };

        projectile.progress += PROJECTILE_FLIGHT_RATE * dt;
        if projectile.progress >= 1.0 {
            *hits.entry(target).or_insert(0.0) += projectile.damage;
            despawn_buffer.push(entity);
            continue;
        }

        pos.0 = projectile.origin.lerp(target_pos, projectile.progress);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    if hits.is_empty() {
        return 0;
    }

    let mut reward = 0u32;
    for (target, _) in roster.iter() {
        let Some(damage) = hits.get(&target) else {
            continue;
        };
        // Gone already when it leaked earlier this tick.
        let Ok((enemy, pos)) = world.query_one_mut::<(&mut Enemy, &Position)>(target) else {
            continue;
        };

        enemy.hp = (enemy.hp - damage).max(0.0);
        if enemy.hp > 0.0 {
            continue;
        }

        let earned = enemy.stats.reward;
        let color = enemy.stats.color.clone();
        let scale = enemy.stats.scale;
        let position = pos.0;
        reward = reward.saturating_add(earned);
        despawn_buffer.push(target);

        world_setup::spawn_explosion(world, position, color, scale, now);
        let id = world_setup::id_of(target);
        debug!(enemy = id.0, reward = earned, "enemy destroyed");
        events.push(SimEvent::EnemyKilled {
            enemy: id,
            reward: earned,
            position,
        });
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    reward
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::components::Effect;
    use bastion_core::config::ConfigTables;
    use bastion_core::enums::EnemyKind;
    use bastion_core::stats::enemy_stats;
    use bastion_core::types::{EntityId, GridCell};
    use glam::DVec3;

    fn spawn_basic(world: &mut World) -> Entity {
        let tables = ConfigTables::builtin();
        let stats = enemy_stats(tables.enemy(EnemyKind::Basic).unwrap(), 1);
        world_setup::spawn_enemy(world, EnemyKind::Basic, stats, GridCell::new(3, 0), 3.0)
    }

    fn fire(world: &mut World, target: Entity, damage: f64) -> Entity {
        world_setup::spawn_projectile(
            world,
            DVec3::ZERO,
            world_setup::id_of(target),
            damage,
            "#ffffff".to_string(),
        )
    }

    fn count<T: hecs::Component>(world: &World) -> usize {
        world.query::<&T>().iter().count()
    }

    #[test]
    fn test_projectile_flies_toward_target() {
        let mut world = World::new();
        let enemy = spawn_basic(&mut world);
        let shot = fire(&mut world, enemy, 5.0);
        let roster = EnemyRoster::capture(&world);

        let mut buffer = Vec::new();
        let mut events = Vec::new();
        let reward = run(&mut world, &roster, 0.25, 0.25, &mut buffer, &mut events);
        assert_eq!(reward, 0);

        let projectile = world.get::<&Projectile>(shot).unwrap();
        assert!((projectile.progress - 0.75).abs() < 1e-12);
        let pos = world.get::<&Position>(shot).unwrap();
        assert!(pos.0.x > 0.0, "projectile should move toward the target");
    }

    #[test]
    fn test_hit_damages_without_killing() {
        let mut world = World::new();
        let enemy = spawn_basic(&mut world);
        fire(&mut world, enemy, 20.0);
        let roster = EnemyRoster::capture(&world);

        let mut buffer = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &roster, 0.5, 0.5, &mut buffer, &mut events);

        assert_eq!(world.get::<&Enemy>(enemy).unwrap().hp, 30.0);
        assert_eq!(count::<Projectile>(&world), 0);
        assert_eq!(count::<Effect>(&world), 0);
    }

    #[test]
    fn test_overkill_pays_once_and_explodes_once() {
        let mut world = World::new();
        let enemy = spawn_basic(&mut world);
        for _ in 0..3 {
            fire(&mut world, enemy, 40.0);
        }
        let roster = EnemyRoster::capture(&world);

        let mut buffer = Vec::new();
        let mut events = Vec::new();
        let reward = run(&mut world, &roster, 0.5, 2.0, &mut buffer, &mut events);

        // Basic reward 10 + floor(2 * wave 1).
        assert_eq!(reward, 12);
        assert!(!world.contains(enemy));
        assert_eq!(count::<Effect>(&world), 1);
        let kills = events
            .iter()
            .filter(|e| matches!(e, SimEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);

        let mut query = world.query::<&Effect>();
        let (_, effect) = query.iter().next().unwrap();
        assert_eq!(effect.created_at, 2.0);
        assert_eq!(effect.color, "#ff0055");
    }

    #[test]
    fn test_lost_target_removes_projectile() {
        let mut world = World::new();
        let enemy = spawn_basic(&mut world);
        fire(&mut world, enemy, 20.0);
        let _ = world.despawn(enemy);
        let roster = EnemyRoster::capture(&world);

        let mut buffer = Vec::new();
        let mut events = Vec::new();
        let reward = run(&mut world, &roster, 0.1, 0.1, &mut buffer, &mut events);
        assert_eq!(reward, 0);
        assert_eq!(count::<Projectile>(&world), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_unknown_target_id_removes_projectile() {
        let mut world = World::new();
        world_setup::spawn_projectile(
            &mut world,
            DVec3::ZERO,
            EntityId(0),
            20.0,
            "#ffffff".to_string(),
        );
        let roster = EnemyRoster::capture(&world);
        let mut buffer = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &roster, 0.1, 0.1, &mut buffer, &mut events);
        assert_eq!(count::<Projectile>(&world), 0);
    }
}
