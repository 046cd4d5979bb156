//! Offer sub-dialogue.
//!
//! After a mood-style reply the system offers "a focus timer or a journal
//! note". While that offer is pending, the next turn is read as an answer
//! to it instead of going through classification. The transition is a pure
//! function of `(state, text)`.

use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::nlu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferState {
    #[default]
    None,
    AwaitingTimerOrJournal,
    AwaitingJournalText,
}

impl OfferState {
    pub fn is_pending(&self) -> bool {
        *self != OfferState::None
    }
}

pub const CHOICE_PROMPT: &str = "Would you like a focus timer or a quick journal note? Say \"timer\" (add minutes like \"15 min\" if you want) or \"journal\".";
pub const JOURNAL_PROMPT: &str =
    "Okay. What would you like to write? I'll save your next message to your journal as-is.";
pub const JOURNAL_EMPTY_PROMPT: &str =
    "I didn't catch anything to save. What would you like to write?";

/// What the offer machine decided for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferStep {
    /// No offer pending; classify the turn normally.
    PassThrough,
    /// Reply with `text` and move to `next`. Used for re-prompts (same
    /// state) and for choosing the journal (new state).
    Prompt {
        next: OfferState,
        text: &'static str,
    },
    /// Carry out `action`; the offer is resolved and the state clears.
    Act { action: Action },
    /// Not an answer to the offer. The state clears and the same turn is
    /// classified normally, so no input is dropped.
    FallThrough,
}

impl OfferStep {
    /// Offer state after this step, given the state before it.
    pub fn next_state(&self, current: OfferState) -> OfferState {
        match self {
            OfferStep::PassThrough => current,
            OfferStep::Prompt { next, .. } => *next,
            OfferStep::Act { .. } | OfferStep::FallThrough => OfferState::None,
        }
    }
}

/// Interpret `text` in the context of the pending offer.
///
/// `default_minutes` is the timer length used when the answer names no
/// duration.
pub fn step(state: OfferState, text: &str, default_minutes: u32) -> OfferStep {
    let text = text.trim();
    let step = match state {
        OfferState::None => OfferStep::PassThrough,
        OfferState::AwaitingTimerOrJournal => {
            if text.is_empty() {
                OfferStep::Prompt {
                    next: state,
                    text: CHOICE_PROMPT,
                }
            } else if nlu::wants_timer(text) {
                OfferStep::Act {
                    action: Action::StartTimer {
                        minutes: nlu::extract_minutes(text).unwrap_or(default_minutes),
                    },
                }
            } else if nlu::wants_journal(text) {
                OfferStep::Prompt {
                    next: OfferState::AwaitingJournalText,
                    text: JOURNAL_PROMPT,
                }
            } else if nlu::is_affirmation(text) {
                OfferStep::Prompt {
                    next: state,
                    text: CHOICE_PROMPT,
                }
            } else {
                OfferStep::FallThrough
            }
        }
        OfferState::AwaitingJournalText => {
            if text.is_empty() {
                OfferStep::Prompt {
                    next: state,
                    text: JOURNAL_EMPTY_PROMPT,
                }
            } else {
                OfferStep::Act {
                    action: Action::AppendJournal {
                        text: text.to_string(),
                    },
                }
            }
        }
    };
    if state.is_pending() {
        tracing::debug!(?state, next = ?step.next_state(state), "offer step");
    }
    step
}
