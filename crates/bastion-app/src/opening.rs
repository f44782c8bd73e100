//! Scripted opening build for unattended runs.

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::TowerType;
use bastion_core::map::MapLayout;
use bastion_core::types::GridCell;

/// Buildable cells touching the path, in path order, without repeats.
pub fn cells_beside_path(map: &MapLayout) -> Vec<GridCell> {
    let mut cells = Vec::new();
    for waypoint in map.path() {
        let neighbours = [
            GridCell::new(waypoint.x + 1, waypoint.z),
            GridCell::new(waypoint.x - 1, waypoint.z),
            GridCell::new(waypoint.x, waypoint.z + 1),
            GridCell::new(waypoint.x, waypoint.z - 1),
        ];
        for cell in neighbours {
            let buildable = map.tile(cell).is_some_and(|tile| tile.is_buildable());
            if buildable && !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Basic towers on the first `count` cells beside the path.
pub fn opening_build(map: &MapLayout, count: usize) -> Vec<PlayerCommand> {
    cells_beside_path(map)
        .into_iter()
        .take(count)
        .map(|cell| PlayerCommand::PlaceTower {
            cell,
            tower_type: TowerType::Basic,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::enums::TileKind;

    #[test]
    fn test_cells_beside_path_are_grass_and_adjacent() {
        let map = MapLayout::default();
        let cells = cells_beside_path(&map);
        assert!(!cells.is_empty());
        for cell in &cells {
            assert_eq!(map.tile(*cell), Some(TileKind::Grass));
            assert!(
                map.path().iter().any(|w| w.is_adjacent(*cell)),
                "{cell:?} should touch the path"
            );
        }
    }

    #[test]
    fn test_opening_build_takes_count() {
        let commands = opening_build(&MapLayout::default(), 3);
        assert_eq!(commands.len(), 3);
        assert!(commands
            .iter()
            .all(|c| matches!(c, PlayerCommand::PlaceTower { tower_type: TowerType::Basic, .. })));
    }
}
