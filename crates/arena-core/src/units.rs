//! Damageable entity kinds.
//!
//! Three concrete structs share the damage rules through `Damageable`;
//! per-kind differences are carried as data (`UnitProfile`), not as types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::UnitProfile;
use crate::damage::Damageable;
use crate::enums::{DegradationLevel, UnitKind};
use crate::events::CombatEvent;
use crate::health::Health;
use crate::types::Cooldown;

/// The controllable tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTank {
    pub health: Health,
    pub shielded: bool,
    /// Bumped on every shield grant so a stale expiry can be told apart.
    pub shield_generation: u32,
    pub cannon: Cooldown,
    pub bomb: Cooldown,
}

impl PlayerTank {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: Health::new(max_health),
            shielded: false,
            shield_generation: 0,
            cannon: Cooldown::default(),
            bomb: Cooldown::default(),
        }
    }

    /// Raise the shield. Returns the generation to hand to the expiry task.
    pub fn grant_shield(&mut self) -> u32 {
        self.shield_generation = self.shield_generation.wrapping_add(1);
        self.shielded = true;
        self.shield_generation
    }

    /// Drop the shield if `generation` is still the latest grant.
    pub fn expire_shield(&mut self, generation: u32) -> bool {
        if self.shielded && self.shield_generation == generation {
            self.shielded = false;
            return true;
        }
        false
    }

    /// Restore `amount` health, clamped to max. Dead tanks stay dead.
    pub fn regenerate(&mut self, amount: f32) -> Option<DegradationLevel> {
        self.health.restore(amount)
    }
}

impl Damageable for PlayerTank {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn death_event(&self, _position: Vec2) -> CombatEvent {
        CombatEvent::PlayerDestroyed
    }

    fn damage_suppressed(&self) -> bool {
        self.shielded
    }
}

/// AI-controlled opposing tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTank {
    pub kind: UnitKind,
    pub health: Health,
    pub reward: i64,
    pub cooldown: Cooldown,
    pub fire_delay_ms: f64,
    /// Whether the unit was inside the engagement region last tick.
    pub engaged: bool,
}

impl EnemyTank {
    pub fn from_profile(kind: UnitKind, profile: &UnitProfile) -> Self {
        Self {
            kind,
            health: Health::new(profile.max_health),
            reward: profile.reward,
            cooldown: Cooldown::default(),
            fire_delay_ms: profile.fire_delay_ms,
            engaged: false,
        }
    }
}

impl Damageable for EnemyTank {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn death_event(&self, position: Vec2) -> CombatEvent {
        CombatEvent::UnitDestroyed {
            position,
            reward: self.reward,
        }
    }
}

/// Destructible scenery (crates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    pub health: Health,
}

impl Scenery {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: Health::new(max_health),
        }
    }
}

impl Damageable for Scenery {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn death_event(&self, position: Vec2) -> CombatEvent {
        CombatEvent::SceneryDestroyed { position }
    }
}
