//! Core types and definitions for the tank arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the damage model, commands, events and the event bus,
//! snapshots, configuration and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod bus;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod enums;
pub mod events;
pub mod health;
pub mod state;
pub mod types;
pub mod units;

#[cfg(test)]
mod tests;
