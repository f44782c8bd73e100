//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components and on the engine.

pub mod effects;
pub mod fire_control;
pub mod movement;
pub mod projectiles;
pub mod roster;
pub mod snapshot;
pub mod wave_director;
