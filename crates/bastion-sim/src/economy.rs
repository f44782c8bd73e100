//! Construction commands: building, upgrading and selling towers.
//!
//! Each operation validates first and only then mutates, so a rejected
//! command leaves the world and the player untouched.

use hecs::World;
use thiserror::Error;
use tracing::debug;

use bastion_core::components::Tower;
use bastion_core::config::ConfigTables;
use bastion_core::enums::{MatchStatus, TowerType};
use bastion_core::events::SimEvent;
use bastion_core::map::MapLayout;
use bastion_core::stats::{sell_refund, tower_stats};
use bastion_core::types::{EntityId, GridCell};

use crate::match_state::{PlayerState, Selection};
use crate::world_setup;

/// Why a command had no effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandRejection {
    #[error("command not allowed while match is {0:?}")]
    WrongStatus(MatchStatus),
    #[error("cell ({}, {}) is outside the map", .0.x, .0.z)]
    OutOfBounds(GridCell),
    #[error("cell ({}, {}) cannot be built on", .0.x, .0.z)]
    NotBuildable(GridCell),
    #[error("cell ({}, {}) already has a tower", .0.x, .0.z)]
    Occupied(GridCell),
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("no tower with id {0:?}")]
    UnknownTower(EntityId),
    #[error("tower type {0:?} has no configuration")]
    UnknownTowerType(TowerType),
}

/// Mutable state a construction command touches.
pub struct Economy<'a> {
    pub world: &'a mut World,
    pub player: &'a mut PlayerState,
    pub selection: &'a mut Selection,
    pub events: &'a mut Vec<SimEvent>,
}

fn tower_at(world: &World, cell: GridCell) -> bool {
    world
        .query::<&Tower>()
        .iter()
        .any(|(_, tower)| tower.cell == cell)
}

/// Build a level-1 tower on `cell`.
pub fn place_tower(
    eco: Economy<'_>,
    tables: &ConfigTables,
    map: &MapLayout,
    cell: GridCell,
    tower_type: TowerType,
) -> Result<EntityId, CommandRejection> {
    if !map.in_bounds(cell) {
        return Err(CommandRejection::OutOfBounds(cell));
    }
    if !map.tile(cell).is_some_and(|tile| tile.is_buildable()) {
        return Err(CommandRejection::NotBuildable(cell));
    }
    if tower_at(eco.world, cell) {
        return Err(CommandRejection::Occupied(cell));
    }
    let config = tables
        .tower(tower_type)
        .ok_or(CommandRejection::UnknownTowerType(tower_type))?;
    if !eco.player.spend(config.cost) {
        return Err(CommandRejection::InsufficientFunds {
            needed: config.cost,
            available: eco.player.money,
        });
    }

    let id = world_setup::id_of(world_setup::spawn_tower(eco.world, tower_type, cell));
    eco.selection.build = None;
    debug!(tower = id.0, ?tower_type, x = cell.x, z = cell.z, "tower built");
    eco.events.push(SimEvent::TowerBuilt {
        tower: id,
        tower_type,
        cell,
    });
    Ok(id)
}

/// Raise a tower one level, paying its current upgrade cost. Returns the new level.
pub fn upgrade_tower(
    eco: Economy<'_>,
    tables: &ConfigTables,
    id: EntityId,
) -> Result<u32, CommandRejection> {
    let entity = world_setup::entity_of(id).ok_or(CommandRejection::UnknownTower(id))?;
    let mut tower = eco
        .world
        .get::<&mut Tower>(entity)
        .map_err(|_| CommandRejection::UnknownTower(id))?;
    let config = tables
        .tower(tower.tower_type)
        .ok_or(CommandRejection::UnknownTowerType(tower.tower_type))?;

    let cost = tower_stats(config, tower.level).upgrade_cost;
    if !eco.player.spend(cost) {
        return Err(CommandRejection::InsufficientFunds {
            needed: cost,
            available: eco.player.money,
        });
    }

    tower.level += 1;
    let level = tower.level;
    debug!(tower = id.0, level, cost, "tower upgraded");
    eco.events.push(SimEvent::TowerUpgraded { tower: id, level });
    Ok(level)
}

/// Remove a tower and refund a fixed fraction of its base cost. Returns the refund.
pub fn sell_tower(
    eco: Economy<'_>,
    tables: &ConfigTables,
    id: EntityId,
) -> Result<u32, CommandRejection> {
    let entity = world_setup::entity_of(id).ok_or(CommandRejection::UnknownTower(id))?;
    let tower_type = eco
        .world
        .get::<&Tower>(entity)
        .map(|tower| tower.tower_type)
        .map_err(|_| CommandRejection::UnknownTower(id))?;
    let config = tables
        .tower(tower_type)
        .ok_or(CommandRejection::UnknownTowerType(tower_type))?;

    let refund = sell_refund(config.cost);
    let _ = eco.world.despawn(entity);
    eco.player.earn(refund);
    if eco.selection.entity == Some(id) {
        eco.selection.entity = None;
    }
    debug!(tower = id.0, refund, "tower sold");
    eco.events.push(SimEvent::TowerSold { tower: id, refund });
    Ok(refund)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        world: World,
        player: PlayerState,
        selection: Selection,
        events: Vec<SimEvent>,
        tables: ConfigTables,
        map: MapLayout,
    }

    impl Fixture {
        fn new(money: u32) -> Self {
            Self {
                world: World::new(),
                player: PlayerState::new(money, 20, 1),
                selection: Selection::default(),
                events: Vec::new(),
                tables: ConfigTables::builtin(),
                map: MapLayout::default(),
            }
        }

        fn eco(&mut self) -> Economy<'_> {
            Economy {
                world: &mut self.world,
                player: &mut self.player,
                selection: &mut self.selection,
                events: &mut self.events,
            }
        }

        fn place(&mut self, x: i32, z: i32, t: TowerType) -> Result<EntityId, CommandRejection> {
            let tables = self.tables.clone();
            let map = self.map.clone();
            place_tower(self.eco(), &tables, &map, GridCell::new(x, z), t)
        }
    }

    #[test]
    fn test_place_on_grass_deducts_cost() {
        let mut fx = Fixture::new(150);
        fx.selection.build = Some(TowerType::Basic);
        let id = fx.place(0, 0, TowerType::Basic).expect("grass should be buildable");
        assert_eq!(fx.player.money, 100);
        assert_eq!(fx.selection.build, None, "build selection should clear");
        let entity = world_setup::entity_of(id).unwrap();
        assert_eq!(fx.world.get::<&Tower>(entity).unwrap().level, 1);
    }

    #[test]
    fn test_place_rejections_leave_state_unchanged() {
        let mut fx = Fixture::new(100);
        fx.place(0, 0, TowerType::Basic).unwrap();

        assert_eq!(
            fx.place(0, 0, TowerType::Basic),
            Err(CommandRejection::Occupied(GridCell::new(0, 0)))
        );
        // (0, 1) is the spawn tile of map 1.
        assert_eq!(
            fx.place(0, 1, TowerType::Basic),
            Err(CommandRejection::NotBuildable(GridCell::new(0, 1)))
        );
        assert_eq!(
            fx.place(-1, 0, TowerType::Basic),
            Err(CommandRejection::OutOfBounds(GridCell::new(-1, 0)))
        );
        assert_eq!(
            fx.place(11, 0, TowerType::Rapid),
            Err(CommandRejection::InsufficientFunds {
                needed: 120,
                available: 50
            })
        );
        assert_eq!(fx.player.money, 50);
        assert_eq!(fx.world.len(), 1);
    }

    #[test]
    fn test_upgrade_then_sell_refund_ignores_level() {
        let mut fx = Fixture::new(1000);
        let id = fx.place(0, 0, TowerType::Basic).unwrap();
        let tables = fx.tables.clone();

        assert_eq!(upgrade_tower(fx.eco(), &tables, id), Ok(2));
        assert_eq!(fx.player.money, 1000 - 50 - 75);

        fx.selection.entity = Some(id);
        assert_eq!(sell_tower(fx.eco(), &tables, id), Ok(35));
        assert_eq!(fx.player.money, 1000 - 50 - 75 + 35);
        assert_eq!(fx.selection.entity, None);
        assert_eq!(fx.world.len(), 0);

        assert_eq!(
            sell_tower(fx.eco(), &tables, id),
            Err(CommandRejection::UnknownTower(id))
        );
    }

    #[test]
    fn test_upgrade_without_funds_is_rejected() {
        let mut fx = Fixture::new(100);
        let id = fx.place(0, 0, TowerType::Basic).unwrap();
        let tables = fx.tables.clone();
        assert_eq!(
            upgrade_tower(fx.eco(), &tables, id),
            Err(CommandRejection::InsufficientFunds {
                needed: 75,
                available: 50
            })
        );
        let entity = world_setup::entity_of(id).unwrap();
        assert_eq!(fx.world.get::<&Tower>(entity).unwrap().level, 1);
    }
}
