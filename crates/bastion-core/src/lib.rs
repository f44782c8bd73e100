//! Core types and definitions for the BASTION tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! configuration tables, the map, stat formulas, components, commands,
//! events, state snapshots and constants. It has no runtime of its own.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod map;
pub mod state;
pub mod stats;
pub mod types;
