//! Score and match phase, owned by the engine.

use arena_core::enums::MatchPhase;
use arena_core::state::MatchOutcome;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub score: i64,
    /// Opposing units not yet destroyed.
    pub active_units: u32,
    pub paused: bool,
    pub sound_enabled: bool,
    pub outcome: Option<MatchOutcome>,
    /// Units destroyed so far (statistics only).
    pub units_destroyed: u32,
    pub shots_fired: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: MatchPhase::Playing,
            score: 0,
            active_units: 0,
            paused: false,
            sound_enabled: true,
            outcome: None,
            units_destroyed: 0,
            shots_fired: 0,
        }
    }
}

impl MatchState {
    /// Apply a score delta. Ignored unless the score is currently positive;
    /// never drives the score below zero.
    pub fn apply_score_delta(&mut self, amount: i64) -> bool {
        if self.score <= 0 {
            return false;
        }
        self.score = self.score.saturating_add(amount).max(0);
        true
    }

    /// Add a delayed reward. Applies unconditionally.
    pub fn award(&mut self, amount: i64) {
        self.score = self.score.saturating_add(amount);
    }

    /// Count one opposing unit destroyed. Returns true if this crossed the
    /// victory threshold while still playing.
    pub fn record_unit_destroyed(&mut self, victory_remaining: u32) -> bool {
        self.active_units = self.active_units.saturating_sub(1);
        self.units_destroyed += 1;
        self.phase == MatchPhase::Playing && self.active_units <= victory_remaining
    }

    pub fn enter_victory(&mut self, bonus: i64) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = MatchPhase::Victory;
        self.outcome = Some(MatchOutcome {
            phase: MatchPhase::Victory,
            final_score: self.score.saturating_add(bonus),
        });
        true
    }

    pub fn enter_defeat(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = MatchPhase::Defeat;
        self.outcome = Some(MatchOutcome {
            phase: MatchPhase::Defeat,
            final_score: self.score,
        });
        true
    }
}
