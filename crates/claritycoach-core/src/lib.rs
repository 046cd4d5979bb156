//! # ClarityCoach Core Library
//!
//! Deterministic routing for a supportive-chat assistant. Every reply comes
//! from fixed rules: there is no model in the loop, and the same input in
//! the same session state always produces the same output.
//!
//! ## Architecture
//!
//! - **NLU**: ordered regex tables. Crisis, panic, and health patterns
//!   short-circuit; otherwise up to two topical labels are picked by a
//!   fixed priority.
//! - **Dialog**: the offer sub-dialogue ("timer or journal?"), reply
//!   composition, and the turn router. Session state is an explicit
//!   [`SessionContext`] value passed in and returned from each turn.
//! - **Timer**: a wall-clock countdown with pause/resume; progress is
//!   derived from the clock on every read, never from ticks.
//! - **Journal**: store contract, day streaks, and weekly summaries.
//! - **Storage**: SQLite journal/turn log and TOML configuration.
//!
//! ## Key Components
//!
//! - [`Dialog`]: turn router
//! - [`FocusTimer`]: countdown state machine
//! - [`Database`]: journal and turn persistence
//! - [`Config`]: application configuration management

pub mod dialog;
pub mod error;
pub mod events;
pub mod fallback;
pub mod journal;
pub mod nlu;
pub mod storage;
pub mod timer;

pub use dialog::{Dialog, DialogConfig, OfferState, SessionContext, SessionRegistry, Turn, TurnReply};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use fallback::{FallbackGenerator, KnowledgeBase};
pub use journal::{JournalEntry, JournalStore, MemoryJournal};
pub use nlu::{IntentLabel, Resolution};
pub use storage::{Config, Database};
pub use timer::{FocusTimer, TimerPhase};
