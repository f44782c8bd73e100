//! Static per-type configuration tables for towers and enemies.
//!
//! Tables are plain data. They are validated once on construction and
//! treated as immutable for the lifetime of an engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{Ability, EnemyKind, TowerType};

/// Errors raised while building or loading configuration tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tower {tower:?}: {field} must be positive, got {value}")]
    NonPositiveTowerStat {
        tower: TowerType,
        field: &'static str,
        value: f64,
    },
    #[error("enemy {kind:?}: {field} must be positive, got {value}")]
    NonPositiveEnemyStat {
        kind: EnemyKind,
        field: &'static str,
        value: f64,
    },
    #[error("missing tower table entry for {0:?}")]
    MissingTower(TowerType),
    #[error("missing enemy table entry for {0:?}")]
    MissingEnemy(EnemyKind),
    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-type tower data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerConfig {
    pub name: String,
    /// Build cost; also the base for upgrade cost and sell refund.
    pub cost: u32,
    pub damage: f64,
    /// Targeting range in world units.
    pub range: f64,
    /// Seconds between shots at level 1.
    pub cooldown: f64,
    pub color: String,
}

/// Per-kind enemy data, before wave scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub name: String,
    /// World units per second.
    pub speed: f64,
    pub hp: f64,
    pub reward: u32,
    pub color: String,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

/// The complete set of type tables consumed by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigTables {
    pub towers: BTreeMap<TowerType, TowerConfig>,
    pub enemies: BTreeMap<EnemyKind, EnemyConfig>,
}

impl Default for ConfigTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfigTables {
    /// The stock tower and enemy roster.
    pub fn builtin() -> Self {
        let mut towers = BTreeMap::new();
        towers.insert(
            TowerType::Basic,
            tower("Pulse Cannon", 50, 20.0, 5.0, 0.8, "#ff0055"),
        );
        towers.insert(
            TowerType::Rapid,
            tower("Flux Emitter", 120, 8.0, 4.0, 0.15, "#00f2ff"),
        );
        towers.insert(
            TowerType::Sniper,
            tower("Phase Driver", 200, 100.0, 9.0, 2.5, "#f9f871"),
        );

        let mut enemies = BTreeMap::new();
        enemies.insert(
            EnemyKind::Basic,
            enemy("Drone", 2.5, 50.0, 10, "#ff0055", 0.4, &[]),
        );
        enemies.insert(
            EnemyKind::Fast,
            enemy("Scout", 4.5, 30.0, 15, "#fbbf24", 0.3, &[Ability::Dash]),
        );
        enemies.insert(
            EnemyKind::Tank,
            enemy("Heavy", 1.5, 150.0, 25, "#8b5cf6", 0.6, &[]),
        );
        enemies.insert(
            EnemyKind::Boss,
            enemy("Titan", 1.0, 600.0, 100, "#ef4444", 0.9, &[]),
        );

        Self { towers, enemies }
    }

    /// Parse tables from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tables: ConfigTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Check that every type has an entry and every stat is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tower_type in TowerType::ALL {
            let cfg = self
                .towers
                .get(&tower_type)
                .ok_or(ConfigError::MissingTower(tower_type))?;
            let stats = [
                ("cost", f64::from(cfg.cost)),
                ("damage", cfg.damage),
                ("range", cfg.range),
                ("cooldown", cfg.cooldown),
            ];
            for (field, value) in stats {
                if value.is_nan() || value <= 0.0 {
                    return Err(ConfigError::NonPositiveTowerStat {
                        tower: tower_type,
                        field,
                        value,
                    });
                }
            }
        }

        for kind in EnemyKind::ALL {
            let cfg = self
                .enemies
                .get(&kind)
                .ok_or(ConfigError::MissingEnemy(kind))?;
            for (field, value) in [("hp", cfg.hp), ("speed", cfg.speed)] {
                if value.is_nan() || value <= 0.0 {
                    return Err(ConfigError::NonPositiveEnemyStat { kind, field, value });
                }
            }
        }

        Ok(())
    }

    /// Tower entry. Validated tables always contain every type.
    pub fn tower(&self, tower_type: TowerType) -> Option<&TowerConfig> {
        self.towers.get(&tower_type)
    }

    pub fn enemy(&self, kind: EnemyKind) -> Option<&EnemyConfig> {
        self.enemies.get(&kind)
    }
}

fn tower(name: &str, cost: u32, damage: f64, range: f64, cooldown: f64, color: &str) -> TowerConfig {
    TowerConfig {
        name: name.to_string(),
        cost,
        damage,
        range,
        cooldown,
        color: color.to_string(),
    }
}

fn enemy(
    name: &str,
    speed: f64,
    hp: f64,
    reward: u32,
    color: &str,
    scale: f64,
    abilities: &[Ability],
) -> EnemyConfig {
    EnemyConfig {
        name: name.to_string(),
        speed,
        hp,
        reward,
        color: color.to_string(),
        scale: Some(scale),
        abilities: abilities.to_vec(),
    }
}
