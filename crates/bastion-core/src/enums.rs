//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of a map tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Open ground; the only buildable kind.
    #[default]
    Grass,
    Path,
    Spawn,
    Base,
    Obstacle,
}

impl TileKind {
    /// Decode the numeric tile code used by map layouts.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Grass),
            1 => Some(TileKind::Path),
            2 => Some(TileKind::Spawn),
            3 => Some(TileKind::Base),
            4 => Some(TileKind::Obstacle),
            _ => None,
        }
    }

    /// Whether enemies can walk on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Path | TileKind::Base)
    }

    pub fn is_buildable(self) -> bool {
        self == TileKind::Grass
    }
}

/// Tower archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerType {
    /// Balanced kinetic pulses.
    Basic,
    /// High fire rate, low damage.
    Rapid,
    /// Long range, slow, heavy hits.
    Sniper,
}

impl TowerType {
    pub const ALL: [TowerType; 3] = [TowerType::Basic, TowerType::Rapid, TowerType::Sniper];
}

/// Enemy archetype chosen by the wave director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Boss,
    ];
}

/// Special abilities an enemy kind may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Periodic short burst of triple speed.
    Dash,
}

/// Top-level match status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Idle,
    Playing,
    GameOver,
}

/// Kind of a transient visual effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    #[default]
    Explosion,
}
