//! Level- and wave-scaled stat formulas.
//!
//! Pure functions over the configuration tables. Nothing here holds state.

use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, TowerConfig};
use crate::constants::*;
use crate::enums::Ability;

/// Tower stats at a given upgrade level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f64,
    pub range: f64,
    pub cooldown: f64,
    /// Cost of going from this level to the next.
    pub upgrade_cost: u32,
}

/// Derive tower stats at `level` (levels start at 1).
pub fn tower_stats(config: &TowerConfig, level: u32) -> TowerStats {
    let steps = f64::from(level.max(1) - 1);
    TowerStats {
        damage: config.damage * (1.0 + TOWER_DAMAGE_PER_LEVEL * steps),
        range: config.range * (1.0 + TOWER_RANGE_PER_LEVEL * steps),
        cooldown: (config.cooldown * (1.0 - TOWER_COOLDOWN_REDUCTION_PER_LEVEL * steps))
            .max(TOWER_MIN_COOLDOWN),
        upgrade_cost: upgrade_cost(config.cost, level),
    }
}

/// floor(base_cost * 1.5^level), saturating at `u32::MAX`.
pub fn upgrade_cost(base_cost: u32, level: u32) -> u32 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    let cost = (f64::from(base_cost) * UPGRADE_COST_GROWTH.powi(exponent)).floor();
    if cost >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        cost as u32
    }
}

/// Refund for selling a tower: a fixed fraction of the base cost.
pub fn sell_refund(base_cost: u32) -> u32 {
    (f64::from(base_cost) * SELL_REFUND_FRACTION).floor() as u32
}

/// Enemy attributes resolved for a specific wave. Fixed once spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f64,
    pub max_hp: f64,
    pub reward: u32,
    pub color: String,
    pub scale: f64,
    pub abilities: Vec<Ability>,
}

impl EnemyStats {
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }
}

/// Scale an enemy kind's base stats to wave `wave` (waves start at 1).
pub fn enemy_stats(config: &EnemyConfig, wave: u32) -> EnemyStats {
    let wave = wave.max(1);
    EnemyStats {
        speed: config.speed,
        max_hp: config.hp * (1.0 + ENEMY_HP_PER_WAVE * f64::from(wave - 1)),
        reward: config.reward + (ENEMY_REWARD_PER_WAVE * f64::from(wave)).floor() as u32,
        color: config.color.clone(),
        scale: config.scale.unwrap_or(DEFAULT_EFFECT_SCALE),
        abilities: config.abilities.clone(),
    }
}

/// Seconds between spawns at the given wave.
pub fn spawn_interval(wave: u32) -> f64 {
    (SPAWN_INTERVAL_BASE - SPAWN_INTERVAL_DECAY_PER_WAVE * f64::from(wave)).max(SPAWN_INTERVAL_MIN)
}

/// Number of enemies a wave spawns before the next one begins.
pub fn wave_size(wave: u32) -> u32 {
    WAVE_SIZE_BASE + (WAVE_SIZE_PER_WAVE * f64::from(wave)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigTables;
    use crate::enums::{EnemyKind, TowerType};

    #[test]
    fn test_level_one_matches_base_config() {
        let tables = ConfigTables::builtin();
        let cfg = tables.tower(TowerType::Basic).unwrap();
        let stats = tower_stats(cfg, 1);
        assert_eq!(stats.damage, cfg.damage);
        assert_eq!(stats.range, cfg.range);
        assert_eq!(stats.cooldown, cfg.cooldown);
        assert_eq!(stats.upgrade_cost, 75);
    }

    #[test]
    fn test_level_three_basic_tower() {
        let tables = ConfigTables::builtin();
        let stats = tower_stats(tables.tower(TowerType::Basic).unwrap(), 3);
        assert!((stats.damage - 30.0).abs() < 1e-9);
        assert!((stats.range - 6.0).abs() < 1e-9);
        assert!((stats.cooldown - 0.72).abs() < 1e-9);
        // floor(50 * 3.375)
        assert_eq!(stats.upgrade_cost, 168);
    }

    #[test]
    fn test_spawn_interval_floor() {
        assert!((spawn_interval(1) - 2.35).abs() < 1e-9);
        assert!((spawn_interval(10) - 1.0).abs() < 1e-9);
        assert_eq!(spawn_interval(14), SPAWN_INTERVAL_MIN);
        assert_eq!(spawn_interval(100), SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_enemy_stats_wave_one_is_unscaled_hp() {
        let tables = ConfigTables::builtin();
        let cfg = tables.enemy(EnemyKind::Fast).unwrap();
        let stats = enemy_stats(cfg, 1);
        assert_eq!(stats.max_hp, 30.0);
        assert_eq!(stats.reward, 17);
        assert_eq!(stats.speed, 4.5);
        assert!(stats.has_ability(Ability::Dash));
    }

    #[test]
    fn test_wave_size() {
        assert_eq!(wave_size(1), 6);
        assert_eq!(wave_size(2), 8);
        assert_eq!(wave_size(5), 12);
    }
}
