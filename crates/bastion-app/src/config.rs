//! Host configuration read from the environment.
//!
//! Missing or unparsable values fall back to defaults with a warning;
//! the host never refuses to start over configuration.

use std::time::Duration;

use tracing::warn;

use bastion_core::config::ConfigTables;
use bastion_core::map::MapLayout;
use bastion_sim::engine::SimConfig;

pub const ENV_SEED: &str = "BASTION_SEED";
pub const ENV_MAP: &str = "BASTION_MAP";
pub const ENV_TABLES: &str = "BASTION_TABLES";
pub const ENV_TIME_SCALE: &str = "BASTION_TIME_SCALE";
pub const ENV_RUN_SECS: &str = "BASTION_RUN_SECS";

/// Nominal frame rate of the game loop.
pub const FRAME_RATE: u32 = 60;
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

const DEFAULT_RUN_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u64,
    /// Built-in map number, 1..=3.
    pub map: usize,
    /// Path to a JSON file overriding the tower and enemy tables.
    pub tables_path: Option<String>,
    pub time_scale: f64,
    /// How long the host runs before shutting the loop down.
    pub run_for: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map: 1,
            tables_path: None,
            time_scale: 1.0,
            run_for: Duration::from_secs(DEFAULT_RUN_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: parse_or(&lookup, ENV_SEED, defaults.seed),
            map: parse_or(&lookup, ENV_MAP, defaults.map),
            tables_path: lookup(ENV_TABLES).filter(|path| !path.trim().is_empty()),
            time_scale: parse_time_scale(&lookup, defaults.time_scale),
            run_for: Duration::from_secs(parse_or(&lookup, ENV_RUN_SECS, DEFAULT_RUN_SECS)),
        }
    }

    /// Resolve map and tables into an engine configuration.
    pub fn sim_config(&self) -> SimConfig {
        let map = MapLayout::builtin(self.map).unwrap_or_else(|err| {
            warn!(map = self.map, %err, "falling back to map 1");
            MapLayout::default()
        });

        let tables = match &self.tables_path {
            Some(path) => load_tables(path),
            None => ConfigTables::builtin(),
        };

        SimConfig {
            seed: self.seed,
            time_scale: self.time_scale,
            map,
            tables,
            ..Default::default()
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparsable setting, using default");
            default
        }),
        None => default,
    }
}

/// `f64` parsing accepts "NaN" and "inf"; those fall back like any other garbage.
fn parse_time_scale(lookup: &impl Fn(&str) -> Option<String>, default: f64) -> f64 {
    let scale = parse_or(lookup, ENV_TIME_SCALE, default);
    if scale.is_finite() {
        scale
    } else {
        warn!(key = ENV_TIME_SCALE, "non-finite time scale, using default");
        default
    }
}

fn load_tables(path: &str) -> ConfigTables {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path, %err, "cannot read tables file, using built-in tables");
            return ConfigTables::builtin();
        }
    };
    ConfigTables::from_json_str(&text).unwrap_or_else(|err| {
        warn!(path, %err, "invalid tables file, using built-in tables");
        ConfigTables::builtin()
    })
}
