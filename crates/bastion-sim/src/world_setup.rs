//! Entity spawn factories and identity conversion.
//!
//! Every entity the engine creates goes through one of these so each
//! kind always carries the same component bundle.

use glam::DVec3;
use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::{EffectKind, EnemyKind, TowerType};
use bastion_core::stats::EnemyStats;
use bastion_core::types::{EntityId, GridCell};

/// External identity of an arena entity.
pub fn id_of(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Arena handle for an external id. Ids of removed entities still decode;
/// lookups against the world then fail, which callers treat as "gone".
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Spawn an enemy at the first waypoint.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    stats: EnemyStats,
    start: GridCell,
    ability_cooldown: f64,
) -> Entity {
    let hp = stats.max_hp;
    world.spawn((
        Enemy { kind, stats, hp },
        PathProgress::default(),
        AbilityTimers {
            cooldown: ability_cooldown,
            active: 0.0,
        },
        Position(start.to_world(ENEMY_HEIGHT)),
    ))
}

/// Spawn a level-1 tower on a cell. Placement is validated by the caller.
pub fn spawn_tower(world: &mut World, tower_type: TowerType, cell: GridCell) -> Entity {
    world.spawn((
        Tower {
            tower_type,
            cell,
            level: 1,
            last_fired: None,
            target: None,
        },
        Position(cell.to_world(TOWER_HEIGHT)),
    ))
}

/// Spawn a projectile leaving `tower_position` toward `target`.
pub fn spawn_projectile(
    world: &mut World,
    tower_position: DVec3,
    target: EntityId,
    damage: f64,
    color: String,
) -> Entity {
    let origin = tower_position + DVec3::new(0.0, PROJECTILE_ORIGIN_OFFSET, 0.0);
    world.spawn((
        Projectile {
            origin,
            target,
            progress: 0.0,
            speed: PROJECTILE_SPEED,
            damage,
            color,
        },
        Position(origin),
    ))
}

/// Spawn an explosion effect.
pub fn spawn_explosion(
    world: &mut World,
    position: DVec3,
    color: String,
    scale: f64,
    created_at: f64,
) -> Entity {
    world.spawn((
        Effect {
            kind: EffectKind::Explosion,
            color,
            scale,
            created_at,
            duration: EXPLOSION_DURATION,
        },
        Position(position),
    ))
}
