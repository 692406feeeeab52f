use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DegradationLevel, MatchPhase, PickupKind, UnitKind, WeaponKind};
use crate::events::{CombatEvent, FxEvent};
use crate::types::SimClock;

/// Complete per-tick state handed to the host for rendering and audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub clock: SimClock,
    pub phase: MatchPhase,
    pub score: i64,
    pub paused: bool,
    pub sound_enabled: bool,
    pub active_units: u32,
    pub outcome: Option<MatchOutcome>,
    pub player: Option<PlayerView>,
    pub units: Vec<UnitView>,
    pub scenery: Vec<SceneryView>,
    pub pickups: Vec<PickupView>,
    pub projectiles: Vec<ProjectileView>,
    /// Gameplay events published during this tick.
    pub events: Vec<CombatEvent>,
    pub fx: Vec<FxEvent>,
}

/// How the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub phase: MatchPhase,
    /// Score at the transition, plus the victory bonus when won.
    pub final_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u64,
    pub position: Vec2,
    pub heading: f32,
    pub health: f32,
    pub max_health: f32,
    pub degradation: DegradationLevel,
    pub alive: bool,
    pub shielded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: u64,
    pub kind: UnitKind,
    pub position: Vec2,
    pub heading: f32,
    pub health: f32,
    pub max_health: f32,
    pub degradation: DegradationLevel,
    pub engaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneryView {
    pub id: u64,
    pub position: Vec2,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub kind: PickupKind,
    pub position: Vec2,
}

/// An active projectile. Inactive pool slots are never reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pool: u16,
    pub slot: u16,
    pub weapon: WeaponKind,
    pub position: Vec2,
    pub velocity: Vec2,
}
