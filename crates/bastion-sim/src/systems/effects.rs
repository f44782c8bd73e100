//! Effect expiry. Effects are never updated after creation; the host polls
//! this to drop the ones whose lifetime has passed.

use hecs::{Entity, World};

use bastion_core::components::Effect;

/// Remove every effect whose lifetime has elapsed at `now`. Returns the count removed.
pub fn expire(world: &mut World, now: f64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    for (entity, effect) in world.query_mut::<&Effect>() {
        if effect.is_expired(now) {
            despawn_buffer.push(entity);
        }
    }

    let expired = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup;
    use glam::DVec3;

    #[test]
    fn test_expires_only_old_effects() {
        let mut world = World::new();
        let old = world_setup::spawn_explosion(&mut world, DVec3::ZERO, "#fff".into(), 0.4, 0.0);
        let fresh = world_setup::spawn_explosion(&mut world, DVec3::ZERO, "#fff".into(), 0.4, 0.5);

        let mut buffer = Vec::new();
        assert_eq!(expire(&mut world, 0.75, &mut buffer), 0);
        assert_eq!(expire(&mut world, 1.0, &mut buffer), 1);
        assert!(!world.contains(old));
        assert!(world.contains(fresh));
    }
}
