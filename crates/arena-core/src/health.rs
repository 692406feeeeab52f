use serde::{Deserialize, Serialize};

use crate::enums::DegradationLevel;

/// Bounded health pool with a derived degradation band.
///
/// `0 <= current <= max` always holds. Once `alive` is cleared it never
/// flips back, and `current` stays frozen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
    alive: bool,
    level: DegradationLevel,
}

/// Result of subtracting health.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthChange {
    /// Health actually removed (after clamping).
    pub dealt: f32,
    /// New band, if the band changed.
    pub level_changed: Option<DegradationLevel>,
    /// True only on the hit that brought health to zero.
    pub died: bool,
}

impl Health {
    /// Full health pool. Non-positive or non-finite maxima are raised to a
    /// tiny positive value so the ratio stays defined.
    pub fn new(max: f32) -> Self {
        let max = if max.is_finite() && max > 0.0 {
            max
        } else {
            f32::EPSILON
        };
        Self {
            current: max,
            max,
            alive: true,
            level: DegradationLevel::Healthy,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn ratio(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn level(&self) -> DegradationLevel {
        self.level
    }

    /// Subtract `amount`. Dead pools and negative or non-finite amounts are
    /// left untouched.
    pub fn take(&mut self, amount: f32) -> HealthChange {
        if !self.alive || !amount.is_finite() || amount <= 0.0 {
            return HealthChange::default();
        }
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        let level_changed = self.refresh_level();
        let died = self.current <= 0.0;
        if died {
            self.alive = false;
        }
        HealthChange {
            dealt: before - self.current,
            level_changed,
            died,
        }
    }

    /// Add `amount`, clamped to `max`. Never revives.
    pub fn restore(&mut self, amount: f32) -> Option<DegradationLevel> {
        if !self.alive || !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        self.current = (self.current + amount).min(self.max);
        self.refresh_level()
    }

    /// Recompute the band from the current ratio. Returns the new band if it changed.
    pub fn refresh_level(&mut self) -> Option<DegradationLevel> {
        let level = DegradationLevel::from_ratio(self.ratio());
        if level == self.level {
            return None;
        }
        self.level = level;
        Some(level)
    }
}
