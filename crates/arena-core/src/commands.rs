use serde::{Deserialize, Serialize};

/// Discrete commands from the host, applied at the start of the next tick.
///
/// Continuous control (movement, aim, triggers) arrives as a per-tick input
/// instead; these are the one-shot requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    Pause,
    Resume,
    SetSound { enabled: bool },
    /// An allied unit (outside this simulation) was destroyed.
    NotifyAllyDestroyed,
    SetTimeScale { scale: f64 },
}
