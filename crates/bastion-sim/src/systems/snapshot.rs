//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use bastion_core::components::*;
use bastion_core::config::ConfigTables;
use bastion_core::enums::MatchStatus;
use bastion_core::events::SimEvent;
use bastion_core::state::*;
use bastion_core::stats::{sell_refund, tower_stats};
use bastion_core::types::SimTime;

use crate::match_state::{PlayerState, Selection};
use crate::world_setup::id_of;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    status: MatchStatus,
    player: &PlayerState,
    selection: &Selection,
    tables: &ConfigTables,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        status,
        player: player.view(),
        selected_build: selection.build,
        selected_entity: selection.entity,
        enemies: build_enemies(world),
        towers: build_towers(world, tables),
        projectiles: build_projectiles(world),
        effects: build_effects(world),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(&Enemy, &PathProgress, &AbilityTimers, &Position)>();
    query
        .iter()
        .map(|(entity, (enemy, route, timers, pos))| EnemyView {
            id: id_of(entity),
            kind: enemy.kind,
            position: pos.0,
            hp: enemy.hp,
            max_hp: enemy.stats.max_hp,
            speed: enemy.stats.speed,
            reward: enemy.stats.reward,
            color: enemy.stats.color.clone(),
            scale: enemy.stats.scale,
            segment: route.segment,
            progress: route.progress,
            dashing: timers.is_active(),
        })
        .collect()
}

fn build_towers(world: &World, tables: &ConfigTables) -> Vec<TowerView> {
    let mut query = world.query::<(&Tower, &Position)>();
    query
        .iter()
        .filter_map(|(entity, (tower, pos))| {
            let config = tables.tower(tower.tower_type)?;
            let stats = tower_stats(config, tower.level);
            Some(TowerView {
                id: id_of(entity),
                tower_type: tower.tower_type,
                cell: tower.cell,
                position: pos.0,
                level: tower.level,
                damage: stats.damage,
                range: stats.range,
                cooldown: stats.cooldown,
                upgrade_cost: stats.upgrade_cost,
                sell_refund: sell_refund(config.cost),
                target: tower.target,
                color: config.color.clone(),
            })
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&Projectile, &Position)>();
    query
        .iter()
        .map(|(entity, (projectile, pos))| ProjectileView {
            id: id_of(entity),
            target: projectile.target,
            position: pos.0,
            progress: projectile.progress,
            color: projectile.color.clone(),
        })
        .collect()
}

fn build_effects(world: &World) -> Vec<EffectView> {
    let mut query = world.query::<(&Effect, &Position)>();
    query
        .iter()
        .map(|(entity, (effect, pos))| EffectView {
            id: id_of(entity),
            kind: effect.kind,
            position: pos.0,
            color: effect.color.clone(),
            scale: effect.scale,
            created_at: effect.created_at,
            duration: effect.duration,
        })
        .collect()
}

