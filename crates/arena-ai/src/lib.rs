//! Opposing-unit AI for the tank arena.
//!
//! Per-unit targeting and fire gating as pure functions over plain data.
//! The engine gathers a context per unit, evaluates it here and applies the
//! decision afterwards.

pub mod controller;

pub use arena_core as core;
