//! Game loop thread: runs the simulation engine at a nominal frame rate.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Each frame passes the real time elapsed
//! since the previous frame as the tick delta, then stores the snapshot for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, info};

use bastion_core::enums::MatchStatus;
use bastion_core::events::SimEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::engine::{SimConfig, SimulationEngine};

use crate::config::FRAME_DURATION;
use crate::state::{GameLoopCommand, LatestSnapshot};

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: LatestSnapshot,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &std::sync::Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    let mut status = engine.status();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the real time since the last frame
        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.tick(delta);
        engine.expire_effects();

        if snapshot.status != status {
            status = snapshot.status;
            log_status_change(&snapshot);
        }
        log_events(&snapshot.events);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

fn log_status_change(snapshot: &GameStateSnapshot) {
    let player = snapshot.player;
    match snapshot.status {
        MatchStatus::Playing => info!(money = player.money, lives = player.lives, "playing"),
        MatchStatus::GameOver => info!(
            wave = player.wave,
            elapsed = snapshot.time.elapsed_secs,
            "base destroyed"
        ),
        MatchStatus::Idle => info!("idle"),
    }
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::WaveStarted { wave } => info!(wave, "wave incoming"),
            SimEvent::TowerBuilt { tower_type, cell, .. } => {
                info!(?tower_type, x = cell.x, z = cell.z, "tower placed")
            }
            other => debug!(?other, "sim event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::commands::PlayerCommand;
    use std::time::Duration;

    use crate::state::new_latest_snapshot;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetTimeScale {
            scale: 2.0,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_runs_match_and_shuts_down() {
        let latest = new_latest_snapshot();
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone());

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("loop should publish");
        assert_eq!(snapshot.status, MatchStatus::Playing);
        assert!(snapshot.time.elapsed_secs > 0.0);
        assert!(!snapshot.enemies.is_empty(), "first frame of a match spawns");
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let (tx, handle) = spawn_game_loop(SimConfig::default(), new_latest_snapshot());
        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartMatch);
        for _ in 0..120 {
            engine.tick(1.0 / 60.0);
        }
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        assert!(json.contains("\"status\":\"Playing\""));
    }
}
