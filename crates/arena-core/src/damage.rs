use glam::Vec2;

use crate::bus::EventBus;
use crate::events::{CombatEvent, FxEvent};
use crate::health::Health;

/// A single damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: f32,
    /// Where the hit landed (projectile position or blast centre).
    pub source: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was dead or protected; nothing changed.
    Ignored,
    Damaged { remaining: f32 },
    Killed,
}

/// Anything with a health pool that combat can reduce.
///
/// Implementors supply storage and their death event; the damage rules are
/// shared through the provided `apply_damage`.
pub trait Damageable {
    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    /// Event published on the bus when health reaches zero.
    fn death_event(&self, position: Vec2) -> CombatEvent;

    /// When true, incoming damage is dropped entirely.
    fn damage_suppressed(&self) -> bool {
        false
    }

    fn is_alive(&self) -> bool {
        self.health().is_alive()
    }

    /// Subtract `hit.amount` from the entity standing at `position`.
    ///
    /// No-op on dead or suppressed targets. A band change emits
    /// `FxEvent::Degraded`; the killing hit publishes `death_event` exactly
    /// once.
    fn apply_damage(&mut self, hit: Hit, position: Vec2, bus: &mut EventBus) -> DamageOutcome {
        if !self.is_alive() || self.damage_suppressed() {
            return DamageOutcome::Ignored;
        }
        let change = self.health_mut().take(hit.amount);
        if change.dealt <= 0.0 && !change.died {
            return DamageOutcome::Ignored;
        }
        bus.emit_fx(FxEvent::Hit {
            position: hit.source,
        });
        if let Some(level) = change.level_changed {
            bus.emit_fx(FxEvent::Degraded { position, level });
        }
        if change.died {
            bus.publish(self.death_event(position));
            bus.emit_fx(FxEvent::Destroyed { position });
            return DamageOutcome::Killed;
        }
        DamageOutcome::Damaged {
            remaining: self.health().current(),
        }
    }
}
