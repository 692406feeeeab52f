//! Tank arena simulation engine.
//!
//! Headless, deterministic combat core: owns the hecs ECS world, the
//! projectile pools, the event bus and the scheduler, and produces an
//! `ArenaSnapshot` every tick.

pub mod collision;
pub mod engine;
pub mod input;
pub mod match_state;
pub mod orchestrator;
pub mod pool;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{ArenaEngine, SimConfig};
pub use input::{ColliderRef, Contact, TickInput};
