//! Game state snapshot: the complete visible state handed to the host.
//!
//! Everything here is a read-only copy; the host never mutates the
//! simulation through it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, GridCell, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub status: MatchStatus,
    pub player: PlayerView,
    pub selected_build: Option<TowerType>,
    pub selected_entity: Option<EntityId>,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub effects: Vec<EffectView>,
    pub events: Vec<SimEvent>,
}

/// Player resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub money: u32,
    pub lives: u32,
    pub wave: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: DVec3,
    pub hp: f64,
    pub max_hp: f64,
    pub speed: f64,
    pub reward: u32,
    pub color: String,
    pub scale: f64,
    pub segment: usize,
    pub progress: f64,
    /// True while a dash is in effect.
    pub dashing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: EntityId,
    pub tower_type: TowerType,
    pub cell: GridCell,
    pub position: DVec3,
    pub level: u32,
    pub damage: f64,
    pub range: f64,
    pub cooldown: f64,
    pub upgrade_cost: u32,
    pub sell_refund: u32,
    pub target: Option<EntityId>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub target: EntityId,
    /// Interpolated position, for drawing only.
    pub position: DVec3,
    pub progress: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub id: EntityId,
    pub kind: EffectKind,
    pub position: DVec3,
    pub color: String,
    pub scale: f64,
    pub created_at: f64,
    pub duration: f64,
}
