//! State shared between the host and the game loop thread.

use std::sync::{Arc, Mutex};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each frame.
pub type LatestSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn new_latest_snapshot() -> LatestSnapshot {
    Arc::new(Mutex::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_snapshot_starts_empty() {
        let latest = new_latest_snapshot();
        assert!(latest.lock().unwrap().is_none());
    }
}
