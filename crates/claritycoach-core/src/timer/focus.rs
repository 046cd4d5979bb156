//! Focus timer implementation.
//!
//! The focus timer is a wall-clock-based countdown. It keeps no counter and
//! spawns no thread: while running, the only stored fact is the epoch second
//! at which the countdown ends, so any reading at any cadence is consistent.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//! Running | Paused --stop--> Idle
//! Running --(first status read after expiry)--> Idle
//! ```
//!
//! Every command has an `*_at(now)` form taking epoch seconds. The plain
//! forms read the system clock at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Shortest countdown a start request can produce, in seconds.
pub const MIN_TOTAL_SECS: u64 = 60;
/// Default upper bound for a single countdown, in minutes.
pub const DEFAULT_MAX_MINUTES: u32 = 120;

pub const IDLE_TEXT: &str = "Timer is idle.";
pub const COMPLETED_TEXT: &str = "Time's up! Take a short break.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Pausable countdown owned by one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTimer {
    phase: TimerPhase,
    total_secs: u64,
    /// Epoch seconds at which a running countdown reaches zero.
    /// Only meaningful in `Running`.
    end_epoch: f64,
    /// Snapshot taken at pause. Only meaningful in `Paused`.
    remaining_secs: u64,
    #[serde(default = "default_max_minutes")]
    max_minutes: u32,
}

fn default_max_minutes() -> u32 {
    DEFAULT_MAX_MINUTES
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::with_max_minutes(DEFAULT_MAX_MINUTES)
    }

    /// Create an idle timer that clamps start requests to `max_minutes`.
    pub fn with_max_minutes(max_minutes: u32) -> Self {
        Self {
            phase: TimerPhase::Idle,
            total_secs: 0,
            end_epoch: 0.0,
            remaining_secs: 0,
            max_minutes: max_minutes.max(1),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    pub fn set_max_minutes(&mut self, max_minutes: u32) {
        self.max_minutes = max_minutes.max(1);
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// Seconds left on the countdown, without touching state.
    ///
    /// A running timer past its end reports 0 here and stays `Running`
    /// until [`FocusTimer::reconcile_at`] or a status read resets it.
    pub fn peek_remaining_at(&self, now: f64) -> u64 {
        match self.phase {
            TimerPhase::Idle => 0,
            TimerPhase::Paused => self.remaining_secs,
            TimerPhase::Running => seconds_left(self.end_epoch, now),
        }
    }

    pub fn peek_remaining(&self) -> u64 {
        self.peek_remaining_at(now_secs())
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress_ratio_at(&self, now: f64) -> f64 {
        if self.phase == TimerPhase::Idle || self.total_secs == 0 {
            return 0.0;
        }
        let total = self.total_secs as f64;
        let done = total - self.peek_remaining_at(now) as f64;
        (done / total).clamp(0.0, 1.0)
    }

    pub fn progress_ratio(&self) -> f64 {
        self.progress_ratio_at(now_secs())
    }

    /// Human-readable status.
    ///
    /// This read has one side effect: a running timer whose countdown has
    /// reached zero is reset to `Idle` and the completion message is
    /// returned. The next read then reports idle, so a finished timer is
    /// observed as finished exactly once.
    pub fn status_text_at(&mut self, now: f64) -> String {
        if self.reconcile_at(now).is_some() {
            return COMPLETED_TEXT.to_string();
        }
        match self.phase {
            TimerPhase::Idle => IDLE_TEXT.to_string(),
            TimerPhase::Paused => format!("Paused, {} remaining.", mm_ss(self.remaining_secs)),
            TimerPhase::Running => {
                format!("{} remaining.", mm_ss(seconds_left(self.end_epoch, now)))
            }
        }
    }

    pub fn status_text(&mut self) -> String {
        self.status_text_at(now_secs())
    }

    /// Reset an expired running timer to `Idle`.
    ///
    /// Returns `Some(Event::TimerCompleted)` the first time it observes
    /// expiry and `None` on every other call.
    pub fn reconcile_at(&mut self, now: f64) -> Option<Event> {
        if self.phase != TimerPhase::Running || seconds_left(self.end_epoch, now) > 0 {
            return None;
        }
        let total_secs = self.total_secs;
        self.clear();
        tracing::info!(total_secs, "focus timer completed");
        Some(Event::TimerCompleted {
            total_secs,
            at: epoch_to_utc(now),
        })
    }

    pub fn reconcile(&mut self) -> Option<Event> {
        self.reconcile_at(now_secs())
    }

    /// Build a full state snapshot event. Does not reconcile.
    pub fn snapshot_at(&self, now: f64) -> Event {
        let remaining_secs = self.peek_remaining_at(now);
        let status = match self.phase {
            TimerPhase::Idle => IDLE_TEXT.to_string(),
            TimerPhase::Paused => format!("Paused, {} remaining.", mm_ss(remaining_secs)),
            TimerPhase::Running => format!("{} remaining.", mm_ss(remaining_secs)),
        };
        Event::StateSnapshot {
            phase: self.phase,
            total_secs: self.total_secs,
            remaining_secs,
            progress: self.progress_ratio_at(now),
            status,
            at: epoch_to_utc(now),
        }
    }

    pub fn snapshot(&self) -> Event {
        self.snapshot_at(now_secs())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) a countdown of `minutes`.
    ///
    /// Valid from every phase. Requests above the configured maximum are
    /// clamped down and anything under a minute is clamped up to 60 seconds.
    pub fn start_at(&mut self, minutes: u32, now: f64) -> Event {
        let minutes = minutes.min(self.max_minutes);
        let total_secs = (u64::from(minutes) * 60).max(MIN_TOTAL_SECS);
        self.phase = TimerPhase::Running;
        self.total_secs = total_secs;
        self.end_epoch = now + total_secs as f64;
        self.remaining_secs = total_secs;
        tracing::info!(total_secs, "focus timer started");
        Event::TimerStarted {
            total_secs,
            at: epoch_to_utc(now),
        }
    }

    pub fn start(&mut self, minutes: u32) -> Event {
        self.start_at(minutes, now_secs())
    }

    pub fn pause_at(&mut self, now: f64) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = seconds_left(self.end_epoch, now);
        self.phase = TimerPhase::Paused;
        tracing::info!(remaining_secs = self.remaining_secs, "focus timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: epoch_to_utc(now),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_secs())
    }

    pub fn resume_at(&mut self, now: f64) -> Option<Event> {
        if self.phase != TimerPhase::Paused {
            return None;
        }
        self.end_epoch = now + self.remaining_secs as f64;
        self.phase = TimerPhase::Running;
        tracing::info!(remaining_secs = self.remaining_secs, "focus timer resumed");
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: epoch_to_utc(now),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_secs())
    }

    /// Reset to `Idle`. A no-op on an idle timer.
    pub fn stop_at(&mut self, now: f64) -> Option<Event> {
        if self.phase == TimerPhase::Idle {
            return None;
        }
        self.clear();
        tracing::info!("focus timer stopped");
        Some(Event::TimerStopped {
            at: epoch_to_utc(now),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.stop_at(now_secs())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear(&mut self) {
        self.phase = TimerPhase::Idle;
        self.total_secs = 0;
        self.end_epoch = 0.0;
        self.remaining_secs = 0;
    }
}

/// Whole seconds until `end_epoch`, floored, never negative.
fn seconds_left(end_epoch: f64, now: f64) -> u64 {
    (end_epoch - now).max(0.0) as u64
}

fn mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Current wall-clock time in epoch seconds.
pub fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

fn epoch_to_utc(epoch: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis((epoch * 1000.0) as i64).unwrap_or_else(Utc::now)
}
