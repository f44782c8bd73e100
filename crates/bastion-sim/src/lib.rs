//! Simulation engine for Bastion.
//!
//! Owns the hecs ECS world, runs the tick stages in a fixed order,
//! and produces GameStateSnapshots for the host.

pub mod economy;
pub mod engine;
pub mod match_state;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine};
