//! Per-unit AI controller.
//!
//! Evaluated once per tick for each living opposing unit. The only state
//! carried between ticks is the unit's cooldown, which the caller owns.
//! No ECS dependency: operates on plain data.

use arena_core::types::{heading_between, EngagementRegion};
use glam::Vec2;

/// Input to the controller for a single unit.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    /// Where shells leave the barrel.
    pub mount: Vec2,
    /// Current target position, if there is a living target.
    pub target: Option<Vec2>,
    /// Whether the unit sits inside this tick's engagement region.
    pub engaged: bool,
    pub alive: bool,
    pub now_ms: f64,
    pub next_fire_ms: f64,
}

/// Derived controller state, reported for presentation and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    /// Dead, or nothing to shoot at.
    Dormant,
    /// Outside the engagement region: tracks but holds fire.
    Holding,
    /// Engaged but still cooling down.
    Reloading,
    /// Engaged, aimed and ready.
    Firing,
}

/// Output of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub state: AiState,
    /// Barrel angle; `None` when the aim is undefined.
    pub heading: Option<f32>,
    /// Attempt a shot this tick. The caller arms the cooldown only if the
    /// shot actually launched.
    pub fire: bool,
}

impl AiDecision {
    const DORMANT: AiDecision = AiDecision {
        state: AiState::Dormant,
        heading: None,
        fire: false,
    };
}

/// Whether a unit at `position` may engage this tick.
pub fn is_engaged(region: &EngagementRegion, position: Vec2) -> bool {
    region.contains(position)
}

/// Barrel angle from the mount to the target. No lead prediction.
pub fn aim(mount: Vec2, target: Option<Vec2>) -> Option<f32> {
    target.and_then(|t| heading_between(mount, t))
}

pub fn evaluate(ctx: &AiContext) -> AiDecision {
    if !ctx.alive || ctx.target.is_none() {
        return AiDecision::DORMANT;
    }

    let heading = aim(ctx.mount, ctx.target);

    if !ctx.engaged {
        return AiDecision {
            state: AiState::Holding,
            heading,
            fire: false,
        };
    }

    if ctx.now_ms < ctx.next_fire_ms {
        return AiDecision {
            state: AiState::Reloading,
            heading,
            fire: false,
        };
    }

    AiDecision {
        state: AiState::Firing,
        heading,
        fire: heading.is_some(),
    }
}
