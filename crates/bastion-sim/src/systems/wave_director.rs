//! Wave director: spawns one enemy each time the spawn timer runs out
//! and escalates the wave counter.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bastion_core::config::ConfigTables;
use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;
use bastion_core::events::SimEvent;
use bastion_core::stats::{enemy_stats, spawn_interval, wave_size};
use bastion_core::types::GridCell;

use crate::match_state::PlayerState;
use crate::world_setup;

/// Spawn timer and per-wave spawn count.
#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    /// Seconds until the next spawn. Starts at zero so a match opens with a spawn.
    pub spawn_timer: f64,
    /// Enemies spawned since the current wave began.
    pub spawned_in_wave: u32,
    /// Whether the wave counter advances after `wave_size(wave)` spawns.
    pub progression: bool,
}

impl WaveDirector {
    pub fn new(progression: bool) -> Self {
        Self {
            spawn_timer: 0.0,
            spawned_in_wave: 0,
            progression,
        }
    }
}

/// Pick an enemy kind for a draw `r` in [0, 1).
///
/// The checks run in a fixed order and each may overwrite the previous
/// choice, so a boss wave past wave 4 can still yield a tank or a scout.
pub fn choose_enemy_kind(wave: u32, r: f64) -> EnemyKind {
    let mut kind = EnemyKind::Basic;
    if wave >= FAST_MIN_WAVE && r > FAST_THRESHOLD {
        kind = EnemyKind::Fast;
    }
    if wave >= TANK_MIN_WAVE && r > TANK_THRESHOLD {
        kind = EnemyKind::Tank;
    }
    if wave % BOSS_WAVE_MULTIPLE == 0 && r > BOSS_THRESHOLD {
        kind = EnemyKind::Boss;
    }
    kind
}

/// Count the timer down and spawn at most one enemy.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    player: &mut PlayerState,
    tables: &ConfigTables,
    path: &[GridCell],
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    director.spawn_timer -= dt;
    if director.spawn_timer > 0.0 {
        return;
    }

    let wave = player.wave;
    director.spawn_timer = spawn_interval(wave);

    let Some(&start) = path.first() else {
        return;
    };

    let r: f64 = rng.gen();
    let kind = choose_enemy_kind(wave, r);
    let Some(config) = tables.enemy(kind) else {
        return;
    };
    let ability_cooldown =
        rng.gen_range(ABILITY_INITIAL_COOLDOWN_MIN..ABILITY_INITIAL_COOLDOWN_MAX);

    let entity = world_setup::spawn_enemy(
        world,
        kind,
        enemy_stats(config, wave),
        start,
        ability_cooldown,
    );
    let id = world_setup::id_of(entity);
    debug!(enemy = id.0, ?kind, wave, "enemy spawned");
    events.push(SimEvent::EnemySpawned { enemy: id, kind });

    director.spawned_in_wave += 1;
    if director.progression && director.spawned_in_wave >= wave_size(wave) {
        director.spawned_in_wave = 0;
        player.wave = wave + 1;
        info!(wave = player.wave, "wave started");
        events.push(SimEvent::WaveStarted { wave: player.wave });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_one_always_basic() {
        for r in [0.0, 0.5, 0.71, 0.9, 0.99] {
            assert_eq!(choose_enemy_kind(1, r), EnemyKind::Basic);
        }
    }

    #[test]
    fn test_fast_from_wave_two() {
        assert_eq!(choose_enemy_kind(2, 0.70), EnemyKind::Basic);
        assert_eq!(choose_enemy_kind(2, 0.71), EnemyKind::Fast);
        // Tank needs wave 4.
        assert_eq!(choose_enemy_kind(3, 0.99), EnemyKind::Fast);
    }

    #[test]
    fn test_later_checks_override_earlier() {
        assert_eq!(choose_enemy_kind(4, 0.86), EnemyKind::Tank);
        assert_eq!(choose_enemy_kind(4, 0.80), EnemyKind::Fast);
        // Wave 5 is a boss wave and past wave 4: all three checks match.
        assert_eq!(choose_enemy_kind(5, 0.96), EnemyKind::Boss);
        assert_eq!(choose_enemy_kind(5, 0.90), EnemyKind::Tank);
        assert_eq!(choose_enemy_kind(5, 0.75), EnemyKind::Fast);
        assert_eq!(choose_enemy_kind(6, 0.99), EnemyKind::Tank);
    }

    #[test]
    fn test_boss_threshold_is_strict() {
        // Wave 10 qualifies for everything; wave 5 is the first boss wave.
        assert_eq!(choose_enemy_kind(10, 0.951), EnemyKind::Boss);
        assert_eq!(choose_enemy_kind(10, 0.95), EnemyKind::Tank);
    }
}
