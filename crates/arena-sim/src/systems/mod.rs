//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only
//! passes) plus whichever engine-owned resources they need. They do not own
//! state.

pub mod cleanup;
pub mod movement;
pub mod overlap;
pub mod player;
pub mod snapshot;
pub mod unit_ai;
