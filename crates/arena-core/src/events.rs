use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DegradationLevel, WeaponKind};

/// Gameplay events carried by the `EventBus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    UnitDestroyed { position: Vec2, reward: i64 },
    PlayerDestroyed,
    ScoreDelta { amount: i64 },
    AllyDestroyed,
    Explosion { position: Vec2, radius: f32, damage: f32 },
    PauseRequested,
    SoundSettingChanged { enabled: bool },
    SceneryDestroyed { position: Vec2 },
}

/// Subscription key. One topic per `CombatEvent` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    UnitDestroyed,
    PlayerDestroyed,
    ScoreDelta,
    AllyDestroyed,
    Explosion,
    PauseRequested,
    SoundSettingChanged,
    SceneryDestroyed,
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::UnitDestroyed,
        Topic::PlayerDestroyed,
        Topic::ScoreDelta,
        Topic::AllyDestroyed,
        Topic::Explosion,
        Topic::PauseRequested,
        Topic::SoundSettingChanged,
        Topic::SceneryDestroyed,
    ];

    pub(crate) fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::UnitDestroyed { .. } => Topic::UnitDestroyed,
            CombatEvent::PlayerDestroyed => Topic::PlayerDestroyed,
            CombatEvent::ScoreDelta { .. } => Topic::ScoreDelta,
            CombatEvent::AllyDestroyed => Topic::AllyDestroyed,
            CombatEvent::Explosion { .. } => Topic::Explosion,
            CombatEvent::PauseRequested => Topic::PauseRequested,
            CombatEvent::SoundSettingChanged { .. } => Topic::SoundSettingChanged,
            CombatEvent::SceneryDestroyed { .. } => Topic::SceneryDestroyed,
        }
    }
}

/// Presentation-only events (sparks, smoke, muzzle flashes, sounds).
///
/// These never feed back into gameplay. They are collected per tick and
/// handed to the host inside the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    Hit { position: Vec2 },
    Destroyed { position: Vec2 },
    Degraded { position: Vec2, level: DegradationLevel },
    ShotFired { weapon: WeaponKind, position: Vec2 },
    Detonation { position: Vec2, radius: f32 },
    ShieldGranted { position: Vec2 },
    ShieldExpired,
}
