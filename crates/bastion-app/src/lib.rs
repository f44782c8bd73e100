//! Headless Bastion host.
//!
//! Wires the simulation engine to a game-loop thread driven by real
//! elapsed time, with configuration taken from the environment.

pub mod config;
pub mod game_loop;
pub mod opening;
pub mod state;

pub use bastion_core as core;
