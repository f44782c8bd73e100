//! Fundamental geometric, identity and time types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;

/// Integer grid coordinates. `x` is the column, `z` the row.
///
/// Signed so that out-of-bounds commands can be expressed and rejected
/// instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space position of the cell center at the given height.
    pub fn to_world(self, height: f64) -> DVec3 {
        DVec3::new(
            f64::from(self.x) * TILE_SIZE,
            height,
            f64::from(self.z) * TILE_SIZE,
        )
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(self, other: GridCell) -> bool {
        (self.x - other.x).abs() + (self.z - other.z).abs() == 1
    }

    /// Straight-line distance to another cell in grid units.
    pub fn distance_to(self, other: GridCell) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dz = f64::from(other.z - self.z);
        (dx * dx + dz * dz).sqrt()
    }
}

/// Stable identity of a simulation entity as seen from outside the engine.
///
/// The engine maps this back to its arena handle; an id whose entity has
/// been removed simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks simulated since the match started.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
