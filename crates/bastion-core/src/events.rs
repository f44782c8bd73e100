//! Events emitted by the simulation for audio and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerType};
use crate::types::{EntityId, GridCell};

/// Something noteworthy that happened during a tick or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    MatchStarted,
    MatchReset,
    /// Base health reached zero.
    GameOver { wave: u32 },
    WaveStarted { wave: u32 },
    EnemySpawned { enemy: EntityId, kind: EnemyKind },
    /// An enemy walked off the end of the path.
    EnemyLeaked { enemy: EntityId },
    EnemyKilled {
        enemy: EntityId,
        reward: u32,
        position: DVec3,
    },
    TowerFired { tower: EntityId, target: EntityId },
    TowerBuilt {
        tower: EntityId,
        tower_type: TowerType,
        cell: GridCell,
    },
    TowerUpgraded { tower: EntityId, level: u32 },
    TowerSold { tower: EntityId, refund: u32 },
}
