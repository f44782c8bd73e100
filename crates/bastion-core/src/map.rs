//! Map grid and the enemy path derived from it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{RawLayout, MAP_LAYOUTS};
use crate::enums::TileKind;
use crate::types::GridCell;

/// Errors raised while building a map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {len} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown tile code {code} at ({x}, {z})")]
    UnknownTile { code: u8, x: usize, z: usize },
    #[error("map has no spawn tile")]
    MissingSpawn,
    #[error("map has no base tile")]
    MissingBase,
    #[error("no walkable route from spawn to base")]
    NoRoute,
    #[error("path needs at least two waypoints, got {0}")]
    PathTooShort(usize),
    #[error("waypoints {index} and {next} are not grid-adjacent")]
    PathNotContiguous { index: usize, next: usize },
    #[error("waypoint {0} lies outside the map")]
    PathOutOfBounds(usize),
    #[error("built-in map {0} does not exist")]
    UnknownBuiltin(usize),
}

/// Immutable tile grid plus the ordered waypoint list enemies follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    width: usize,
    height: usize,
    /// Row-major tiles, `tiles[z * width + x]`.
    tiles: Vec<TileKind>,
    path: Vec<GridCell>,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self::from_raw(MAP_LAYOUTS[0]).unwrap_or_else(|_| unreachable!("built-in map 1 is valid"))
    }
}

impl MapLayout {
    /// One of the built-in layouts, numbered from 1.
    pub fn builtin(number: usize) -> Result<Self, MapError> {
        let raw = number
            .checked_sub(1)
            .and_then(|index| MAP_LAYOUTS.get(index))
            .ok_or(MapError::UnknownBuiltin(number))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: &RawLayout) -> Result<Self, MapError> {
        let rows: Vec<Vec<u8>> = raw.iter().map(|row| row.to_vec()).collect();
        Self::from_codes(&rows)
    }

    /// Build from tile codes and derive the path by breadth-first search
    /// from the spawn tile to the base tile.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, MapError> {
        let (width, height, tiles) = decode_tiles(rows)?;
        let mut map = Self {
            width,
            height,
            tiles,
            path: Vec::new(),
        };
        map.path = map.find_path()?;
        Ok(map)
    }

    /// Build from tile codes with an explicitly supplied waypoint list.
    pub fn with_waypoints(rows: &[Vec<u8>], path: Vec<GridCell>) -> Result<Self, MapError> {
        let (width, height, tiles) = decode_tiles(rows)?;
        let map = Self {
            width,
            height,
            tiles,
            path,
        };
        map.validate_path()?;
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ordered waypoints from entry to exit.
    pub fn path(&self) -> &[GridCell] {
        &self.path
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        self.index_of(cell).is_some()
    }

    /// Tile at a cell, or None outside the grid.
    pub fn tile(&self, cell: GridCell) -> Option<TileKind> {
        self.index_of(cell).map(|i| self.tiles[i])
    }

    fn index_of(&self, cell: GridCell) -> Option<usize> {
        let x = usize::try_from(cell.x).ok()?;
        let z = usize::try_from(cell.z).ok()?;
        if x >= self.width || z >= self.height {
            return None;
        }
        Some(z * self.width + x)
    }

    /// Last tile of `kind` in row-major order.
    fn find_tile(&self, kind: TileKind) -> Option<GridCell> {
        let index = self.tiles.iter().rposition(|&t| t == kind)?;
        Some(GridCell::new(
            (index % self.width) as i32,
            (index / self.width) as i32,
        ))
    }

    fn find_path(&self) -> Result<Vec<GridCell>, MapError> {
        let start = self.find_tile(TileKind::Spawn).ok_or(MapError::MissingSpawn)?;
        let end = self.find_tile(TileKind::Base).ok_or(MapError::MissingBase)?;

        let mut parent: Vec<Option<usize>> = vec![None; self.tiles.len()];
        let mut visited = vec![false; self.tiles.len()];
        let mut queue = VecDeque::new();

        let start_index = self.index_of(start).ok_or(MapError::MissingSpawn)?;
        visited[start_index] = true;
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            if cell == end {
                return Ok(self.unwind(&parent, end));
            }
            let current = self.index_of(cell).ok_or(MapError::NoRoute)?;
            let neighbours = [
                GridCell::new(cell.x + 1, cell.z),
                GridCell::new(cell.x - 1, cell.z),
                GridCell::new(cell.x, cell.z + 1),
                GridCell::new(cell.x, cell.z - 1),
            ];
            for next in neighbours {
                let Some(index) = self.index_of(next) else {
                    continue;
                };
                if visited[index] || !self.tiles[index].is_walkable() {
                    continue;
                }
                visited[index] = true;
                parent[index] = Some(current);
                queue.push_back(next);
            }
        }

        Err(MapError::NoRoute)
    }

    fn unwind(&self, parent: &[Option<usize>], end: GridCell) -> Vec<GridCell> {
        let mut path = vec![end];
        let mut cursor = self.index_of(end);
        while let Some(prev) = cursor.and_then(|i| parent[i]) {
            path.push(GridCell::new(
                (prev % self.width) as i32,
                (prev / self.width) as i32,
            ));
            cursor = Some(prev);
        }
        path.reverse();
        path
    }

    fn validate_path(&self) -> Result<(), MapError> {
        if self.path.len() < 2 {
            return Err(MapError::PathTooShort(self.path.len()));
        }
        for (index, cell) in self.path.iter().enumerate() {
            if !self.in_bounds(*cell) {
                return Err(MapError::PathOutOfBounds(index));
            }
        }
        for (index, pair) in self.path.windows(2).enumerate() {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(MapError::PathNotContiguous {
                    index,
                    next: index + 1,
                });
            }
        }
        Ok(())
    }
}

fn decode_tiles(rows: &[Vec<u8>]) -> Result<(usize, usize, Vec<TileKind>), MapError> {
    let width = rows.first().map(Vec::len).ok_or(MapError::Empty)?;
    if width == 0 {
        return Err(MapError::Empty);
    }

    let mut tiles = Vec::with_capacity(width * rows.len());
    for (z, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(MapError::RaggedRow {
                row: z,
                len: row.len(),
                expected: width,
            });
        }
        for (x, &code) in row.iter().enumerate() {
            let kind = TileKind::from_code(code).ok_or(MapError::UnknownTile { code, x, z })?;
            tiles.push(kind);
        }
    }

    Ok((width, rows.len(), tiles))
}
