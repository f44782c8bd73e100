//! Player commands sent from the host to the simulation.
//!
//! Commands are validated when applied. Invalid ones change nothing.

use serde::{Deserialize, Serialize};

use crate::enums::TowerType;
use crate::types::{EntityId, GridCell};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match lifecycle ---
    /// Begin a fresh match from idle.
    StartMatch,
    /// Return to idle after game over.
    ResetMatch,

    // --- Construction ---
    /// Build a tower of the given type on a grid cell.
    PlaceTower { cell: GridCell, tower_type: TowerType },
    /// Raise a tower's level by one.
    UpgradeTower { tower: EntityId },
    /// Remove a tower for a partial refund.
    SellTower { tower: EntityId },

    // --- Selection ---
    /// Choose (or clear) the tower type to build.
    SelectBuildType { tower_type: Option<TowerType> },
    /// Choose (or clear) the entity inspected by the UI.
    SelectEntity { entity: Option<EntityId> },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
}
