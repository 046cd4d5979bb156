//! Intent resolver.
//!
//! Escalation short-circuits first (crisis, then panic, then health), then a
//! priority-ordered pick of at most two topical labels. Priority order is
//! the only tie-break; match count and position in the text never matter.

use serde::{Deserialize, Serialize};

use super::label::IntentLabel;
use super::patterns::{normalize, LexicalMatcher};

/// Most labels a single turn resolves to.
pub const MAX_LABELS: usize = 2;

/// Outcome of resolving one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// One to [`MAX_LABELS`] labels, highest priority first.
    pub labels: Vec<IntentLabel>,
    /// Nothing matched and `small_talk` was filled in as the default.
    pub defaulted: bool,
}

impl Resolution {
    pub fn primary(&self) -> IntentLabel {
        self.labels.first().copied().unwrap_or(IntentLabel::SmallTalk)
    }

    pub fn is_escalation(&self) -> bool {
        self.primary().is_escalation()
    }

    fn single(label: IntentLabel) -> Self {
        Self {
            labels: vec![label],
            defaulted: false,
        }
    }
}

/// Resolve free text to an ordered list of at most two labels.
pub fn resolve(text: &str) -> Resolution {
    resolve_with(LexicalMatcher::global(), text)
}

/// Bare label list form of [`resolve`].
pub fn labels(text: &str) -> Vec<IntentLabel> {
    resolve(text).labels
}

pub fn resolve_with(matcher: &LexicalMatcher, text: &str) -> Resolution {
    let normalized = normalize(text);

    if let Some(label) = matcher.escalation_match(&normalized) {
        tracing::debug!(%label, "escalation pattern matched");
        return Resolution::single(label);
    }

    let mut matched = matcher.topical_matches(&normalized);
    if matched.is_empty() {
        return Resolution {
            labels: vec![IntentLabel::SmallTalk],
            defaulted: true,
        };
    }

    matched.sort_by_key(IntentLabel::priority_rank);
    matched.dedup();
    matched.truncate(MAX_LABELS);
    tracing::debug!(labels = ?matched, "topical labels resolved");
    Resolution {
        labels: matched,
        defaulted: false,
    }
}
