//! Headless runner for the tank arena: a game loop thread and a scripted
//! autopilot that can drive a full match without a renderer.

pub mod autopilot;
pub mod game_loop;

pub use arena_sim as sim;
