//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! so every rule can be driven from tests with fixed deltas.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bastion_core::commands::PlayerCommand;
use bastion_core::config::ConfigTables;
use bastion_core::constants::*;
use bastion_core::enums::MatchStatus;
use bastion_core::events::SimEvent;
use bastion_core::map::MapLayout;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::SimTime;

use crate::economy::{self, CommandRejection, Economy};
use crate::match_state::{PlayerState, Selection};
use crate::systems;
use crate::systems::roster::EnemyRoster;
use crate::systems::wave_director::WaveDirector;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Every match started from the same config draws the same sequence.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub map: MapLayout,
    pub tables: ConfigTables,
    pub starting_money: u32,
    pub starting_lives: u32,
    /// Advance the wave counter once a wave's enemies have all spawned.
    pub wave_progression: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            map: MapLayout::default(),
            tables: ConfigTables::builtin(),
            starting_money: STARTING_MONEY,
            starting_lives: STARTING_LIVES,
            wave_progression: true,
        }
    }
}

/// Clamp a time scale to [0, MAX_TIME_SCALE]. Non-finite values fall back to 1.
pub fn sanitize_time_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(0.0, MAX_TIME_SCALE)
    } else {
        1.0
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    status: MatchStatus,
    time_scale: f64,
    seed: u64,
    rng: ChaCha8Rng,
    map: MapLayout,
    tables: ConfigTables,
    starting_money: u32,
    starting_lives: u32,
    player: PlayerState,
    selection: Selection,
    director: WaveDirector,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The match starts idle.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            status: MatchStatus::default(),
            time_scale: sanitize_time_scale(config.time_scale),
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            map: config.map,
            tables: config.tables,
            starting_money: config.starting_money,
            starting_lives: config.starting_lives,
            player: PlayerState::new(config.starting_money, config.starting_lives, STARTING_WAVE),
            selection: Selection::default(),
            director: WaveDirector::new(config.wave_progression),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `delta` real seconds and return the resulting snapshot.
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn tick(&mut self, delta: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.status == MatchStatus::Playing {
            let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
            let dt = delta * self.time_scale;
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing. Pending events are included but kept.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(self.events.clone())
    }

    /// Remove effects whose lifetime has elapsed. Returns how many were removed.
    pub fn expire_effects(&mut self) -> usize {
        systems::effects::expire(
            &mut self.world,
            self.time.elapsed_secs,
            &mut self.despawn_buffer,
        )
    }

    /// Apply a command immediately, reporting why it had no effect if so.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandRejection> {
        match command {
            PlayerCommand::StartMatch => {
                self.require_status(MatchStatus::Idle)?;
                self.clear_match();
                self.status = MatchStatus::Playing;
                info!(seed = self.seed, "match started");
                self.events.push(SimEvent::MatchStarted);
            }
            PlayerCommand::ResetMatch => {
                self.require_status(MatchStatus::GameOver)?;
                self.clear_match();
                self.status = MatchStatus::Idle;
                info!("match reset");
                self.events.push(SimEvent::MatchReset);
            }
            PlayerCommand::PlaceTower { cell, tower_type } => {
                self.require_status(MatchStatus::Playing)?;
                let eco = Economy {
                    world: &mut self.world,
                    player: &mut self.player,
                    selection: &mut self.selection,
                    events: &mut self.events,
                };
                economy::place_tower(eco, &self.tables, &self.map, cell, tower_type)?;
            }
            PlayerCommand::UpgradeTower { tower } => {
                self.require_status(MatchStatus::Playing)?;
                let eco = Economy {
                    world: &mut self.world,
                    player: &mut self.player,
                    selection: &mut self.selection,
                    events: &mut self.events,
                };
                economy::upgrade_tower(eco, &self.tables, tower)?;
            }
            PlayerCommand::SellTower { tower } => {
                self.require_status(MatchStatus::Playing)?;
                let eco = Economy {
                    world: &mut self.world,
                    player: &mut self.player,
                    selection: &mut self.selection,
                    events: &mut self.events,
                };
                economy::sell_tower(eco, &self.tables, tower)?;
            }
            PlayerCommand::SelectBuildType { tower_type } => {
                self.require_status(MatchStatus::Playing)?;
                self.selection.build = tower_type;
            }
            PlayerCommand::SelectEntity { entity } => {
                self.require_status(MatchStatus::Playing)?;
                self.selection.entity = entity;
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = sanitize_time_scale(scale);
            }
        }
        Ok(())
    }

    /// Get the current match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn map(&self) -> &MapLayout {
        &self.map
    }

    pub fn tables(&self) -> &ConfigTables {
        &self.tables
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn an enemy of `kind` scaled to the current wave at the path start.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: bastion_core::enums::EnemyKind,
        ability_cooldown: f64,
    ) -> Option<bastion_core::types::EntityId> {
        let config = self.tables.enemy(kind)?;
        let stats = bastion_core::stats::enemy_stats(config, self.player.wave);
        let start = *self.map.path().first()?;
        let entity =
            crate::world_setup::spawn_enemy(&mut self.world, kind, stats, start, ability_cooldown);
        Some(crate::world_setup::id_of(entity))
    }

    /// Mutable world access for tests that stage entities directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Hold off the wave director for `secs` seconds.
    #[cfg(test)]
    pub fn delay_spawns(&mut self, secs: f64) {
        self.director.spawn_timer = secs;
    }

    fn require_status(&self, expected: MatchStatus) -> Result<(), CommandRejection> {
        if self.status == expected {
            Ok(())
        } else {
            Err(CommandRejection::WrongStatus(self.status))
        }
    }

    /// Discard every entity and restore the starting player state.
    ///
    /// Despawns one by one so generations keep rising; `World::clear` would let
    /// ids from the old match alias new entities.
    fn clear_match(&mut self) {
        self.despawn_buffer.clear();
        self.despawn_buffer
            .extend(self.world.iter().map(|entity| entity.entity()));
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.player = PlayerState::new(self.starting_money, self.starting_lives, STARTING_WAVE);
        self.selection = Selection::default();
        self.director = WaveDirector::new(self.director.progression);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.apply_command(command) {
                debug!(%reason, "command rejected");
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        // Targeting and hit resolution see enemies as they were when the tick began.
        let roster = EnemyRoster::capture(&self.world);

        // 1. Wave director
        systems::wave_director::run(
            &mut self.world,
            &mut self.rng,
            &mut self.director,
            &mut self.player,
            &self.tables,
            self.map.path(),
            dt,
            &mut self.events,
        );
        // 2. Movement and leaks
        let leaked = systems::movement::run(
            &mut self.world,
            self.map.path(),
            dt,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        if leaked > 0 && self.player.lose_lives(leaked) && self.status == MatchStatus::Playing {
            self.status = MatchStatus::GameOver;
            info!(wave = self.player.wave, tick = self.time.tick, "game over");
            self.events.push(SimEvent::GameOver {
                wave: self.player.wave,
            });
        }
        // 3. Fire control
        systems::fire_control::run(
            &mut self.world,
            &roster,
            &self.tables,
            now,
            &mut self.events,
        );
        // 4. Projectiles and hits
        let reward = systems::projectiles::run(
            &mut self.world,
            &roster,
            dt,
            now,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        self.player.earn(reward);
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.status,
            &self.player,
            &self.selection,
            &self.tables,
            events,
        )
    }
}
