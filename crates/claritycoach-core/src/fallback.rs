//! Fallback reply generation for turns no rule or offer handles.
//!
//! The dialogue engine only sees the [`FallbackGenerator`] trait. The
//! bundled implementation is a small keyword retriever over a local JSON
//! knowledge base; hosts may plug in anything else.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialog::{ChatMessage, Role};
use crate::error::Result;

pub const NOT_SURE_TEXT: &str = "I'm not fully sure yet, but I can help you set a 10-minute focus block or record a one-line journal.";
pub const PLAN_FOLLOW_UP: &str = "*Want me to tailor a tiny 3-step plan for today?*";

/// Snippets returned per reply.
pub const TOP_K: usize = 3;

/// Produces a reply from the conversation so far.
pub trait FallbackGenerator: Send + Sync {
    fn generate(&self, conversation: &[ChatMessage]) -> String;
}

/// One knowledge base row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Keyword retriever over a list of short articles.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KbEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KbEntry>) -> Self {
        Self { entries }
    }

    /// Load a JSON array of `{title, body}` rows.
    ///
    /// A missing file yields an empty knowledge base.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no knowledge base file");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<KbEntry> = serde_json::from_str(&content)?;
        tracing::debug!(count = entries.len(), "knowledge base loaded");
        Ok(Self { entries })
    }

    /// Like [`KnowledgeBase::load`] but logs and falls back to empty on error.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable knowledge base");
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `k` distinct snippets, best keyword overlap first.
    ///
    /// Words under three characters are not counted. Equal scores keep
    /// knowledge base order.
    pub fn search(&self, query: &str, k: usize) -> Vec<String> {
        let q = query.to_lowercase();
        let words: Vec<&str> = q.split_whitespace().filter(|w| w.len() >= 3).collect();

        let mut scored: Vec<(usize, String)> = self
            .entries
            .iter()
            .filter_map(|row| {
                let text = format!("{}: {}", row.title, row.body).trim().to_string();
                let haystack = text.to_lowercase();
                let score = words.iter().filter(|w| haystack.contains(**w)).count();
                (score > 0).then_some((score, text))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for (_, text) in scored {
            let key = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(text);
            if out.len() == k {
                break;
            }
        }
        out
    }
}

impl FallbackGenerator for KnowledgeBase {
    fn generate(&self, conversation: &[ChatMessage]) -> String {
        let last_user = conversation
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.text.as_str())
            .unwrap_or_default();
        let chunks = self.search(last_user, TOP_K);
        if chunks.is_empty() {
            return NOT_SURE_TEXT.to_string();
        }
        format!("{}\n\n{PLAN_FOLLOW_UP}", chunks.join("\n\n"))
    }
}
