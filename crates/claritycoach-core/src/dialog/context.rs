use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::offer::OfferState;
use crate::timer::FocusTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Everything one chat session carries between turns.
///
/// Passed by value into each turn and handed back with the reply, so the
/// pending offer and the focus timer of one session can never leak into
/// another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    #[serde(default)]
    pub offer: OfferState,
    #[serde(default)]
    pub timer: FocusTimer,
    /// Most recent messages, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            offer: OfferState::None,
            timer: FocusTimer::new(),
            history: Vec::new(),
        }
    }

    /// Append a message, dropping the oldest ones beyond `limit`.
    pub fn push_history(&mut self, message: ChatMessage, limit: usize) {
        self.history.push(message);
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }
}
