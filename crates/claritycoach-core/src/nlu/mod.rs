//! Rule-based language understanding: lexical patterns, intent resolution,
//! and explicit commands. Everything here is a pure function of the text.

mod commands;
mod label;
mod patterns;
mod resolver;

pub use commands::{
    detect_command, extract_minutes, is_affirmation, is_goodbye, is_greeting, wants_journal,
    wants_timer, Command,
};
pub use label::{IntentLabel, ESCALATION_ORDER, TOPICAL_PRIORITY};
pub use patterns::{normalize, LexicalMatcher};
pub use resolver::{labels, resolve, resolve_with, Resolution, MAX_LABELS};
