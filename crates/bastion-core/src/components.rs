//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond trivial
//! accessors. Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EffectKind, EnemyKind, TowerType};
use crate::stats::EnemyStats;
use crate::types::{EntityId, GridCell};

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// A mobile agent walking the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Wave-scaled attributes resolved at spawn time.
    pub stats: EnemyStats,
    /// Never exceeds `stats.max_hp`; only hit resolution lowers it.
    pub hp: f64,
}

/// Where an enemy is along the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the waypoint the current segment starts at.
    pub segment: usize,
    /// Fraction in [0, 1) along the current segment.
    pub progress: f64,
}

/// Ability timers (seconds). Only consulted for enemies with abilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityTimers {
    pub cooldown: f64,
    pub active: f64,
}

impl AbilityTimers {
    pub fn is_active(&self) -> bool {
        self.active > 0.0
    }
}

/// A stationary, player-built agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub tower_type: TowerType,
    pub cell: GridCell,
    /// Starts at 1; only upgrades change it.
    pub level: u32,
    /// Simulation time of the last shot, None until the first one.
    pub last_fired: Option<f64>,
    /// Last target fired at. Display only, may no longer exist.
    pub target: Option<EntityId>,
}

/// A shot in flight, bound to its target by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub origin: DVec3,
    pub target: EntityId,
    /// Fraction in [0, 1) of the flight completed.
    pub progress: f64,
    pub speed: f64,
    pub damage: f64,
    pub color: String,
}

/// A transient visual effect. Never updated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub color: String,
    pub scale: f64,
    pub created_at: f64,
    pub duration: f64,
}

impl Effect {
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.created_at >= self.duration
    }
}
