//! Enemy movement along the path and the dash ability state machine.

use hecs::{Entity, World};
use tracing::debug;

use bastion_core::components::{AbilityTimers, Enemy, PathProgress, Position};
use bastion_core::constants::*;
use bastion_core::enums::Ability;
use bastion_core::events::SimEvent;
use bastion_core::types::GridCell;

use crate::world_setup;

/// Advance dash timers by `dt` and return the speed multiplier for this tick.
///
/// An active dash runs down first. Otherwise the cooldown runs down, and
/// when it expires the dash is armed; the boost starts on the next tick.
pub fn step_dash(timers: &mut AbilityTimers, dt: f64) -> f64 {
    if timers.active > 0.0 {
        timers.active -= dt;
        return DASH_SPEED_MULTIPLIER;
    }

    timers.cooldown -= dt;
    if timers.cooldown <= 0.0 {
        timers.active = DASH_DURATION;
        timers.cooldown = DASH_COOLDOWN;
    }
    1.0
}

/// Move every enemy along the path.
///
/// Enemies that run off the last waypoint are despawned. Returns how many
/// did so; the caller turns that into base-health loss.
pub fn run(
    world: &mut World,
    path: &[GridCell],
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) -> u32 {
    despawn_buffer.clear();

    for (entity, (enemy, route, timers, pos)) in world.query_mut::<(
        &Enemy,
        &mut PathProgress,
        &mut AbilityTimers,
        &mut Position,
    )>() {
        let mut speed = enemy.stats.speed;
        if enemy.stats.has_ability(Ability::Dash) {
            speed *= step_dash(timers, dt);
        }

        if advance_along_path(route, path, speed * dt) {
            despawn_buffer.push(entity);
            continue;
        }

        pos.0 = position_on_path(route, path);
    }

    let leaked = despawn_buffer.len() as u32;
    for entity in despawn_buffer.drain(..) {
        let id = world_setup::id_of(entity);
        debug!(enemy = id.0, "enemy reached base");
        events.push(SimEvent::EnemyLeaked { enemy: id });
        let _ = world.despawn(entity);
    }
    leaked
}

/// Move `distance` world units along the current segment. Returns true
/// once the enemy has no segment left to walk.
fn advance_along_path(route: &mut PathProgress, path: &[GridCell], distance: f64) -> bool {
    let (Some(from), Some(to)) = (path.get(route.segment), path.get(route.segment + 1)) else {
        return true;
    };

    let segment_length = from.distance_to(*to) * TILE_SIZE;
    if segment_length > 0.0 {
        route.progress += distance / segment_length;
    } else {
        route.progress = 1.0;
    }

    if route.progress >= 1.0 {
        route.progress = 0.0;
        route.segment += 1;
        if route.segment + 1 >= path.len() {
            return true;
        }
    }
    false
}

/// World position for a path progress, interpolated between waypoints.
pub fn position_on_path(route: &PathProgress, path: &[GridCell]) -> glam::DVec3 {
    let Some(from) = path.get(route.segment) else {
        return glam::DVec3::ZERO;
    };
    let to = path.get(route.segment + 1).unwrap_or(from);
    from.to_world(ENEMY_HEIGHT)
        .lerp(to.to_world(ENEMY_HEIGHT), route.progress)
}
