use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every focus timer state change produces an Event.
/// Hosts print or forward them; the dialogue layer turns them into replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and the timer reset itself to idle.
    TimerCompleted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        total_secs: u64,
        remaining_secs: u64,
        progress: f64,
        status: String,
        at: DateTime<Utc>,
    },
}
