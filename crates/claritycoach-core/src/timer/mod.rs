mod focus;

pub use focus::{
    now_secs, FocusTimer, TimerPhase, COMPLETED_TEXT, DEFAULT_MAX_MINUTES, IDLE_TEXT,
    MIN_TOTAL_SECS,
};
