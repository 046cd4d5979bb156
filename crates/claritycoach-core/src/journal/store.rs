use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One saved journal note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// Append-only journal persistence.
///
/// The dialogue layer only needs these two calls; how entries are stored is
/// up to the host.
pub trait JournalStore {
    /// Store `text` exactly as given and return the saved entry.
    fn append(&mut self, text: &str) -> Result<JournalEntry>;

    /// Up to `limit` entries, newest first.
    fn list(&self, limit: usize) -> Result<Vec<JournalEntry>>;
}

/// In-memory journal, used by tests and by hosts that keep no history.
#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    entries: Vec<JournalEntry>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append with an explicit timestamp.
    pub fn append_at(&mut self, text: &str, timestamp: DateTime<Utc>) -> JournalEntry {
        let entry = JournalEntry {
            id: self.entries.len() as i64 + 1,
            timestamp,
            text: text.to_string(),
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl JournalStore for MemoryJournal {
    fn append(&mut self, text: &str) -> Result<JournalEntry> {
        Ok(self.append_at(text, Utc::now()))
    }

    fn list(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        out.truncate(limit);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn append_then_list_returns_newest_first() {
        let mut journal = MemoryJournal::new();
        let now = Utc::now();
        journal.append_at("older", now - Duration::hours(3));
        journal.append_at("newest", now);
        journal.append_at("middle", now - Duration::hours(1));

        let texts: Vec<_> = journal
            .list(10)
            .unwrap()
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(texts, vec!["newest", "middle", "older"]);
    }

    #[test]
    fn append_keeps_text_verbatim() {
        let mut journal = MemoryJournal::new();
        journal.append("  spaced\nout  ").unwrap();
        assert_eq!(journal.list(1).unwrap()[0].text, "  spaced\nout  ");
    }

    #[test]
    fn list_respects_limit() {
        let mut journal = MemoryJournal::new();
        for i in 0..5 {
            journal.append(&format!("note {i}")).unwrap();
        }
        assert_eq!(journal.list(2).unwrap().len(), 2);
        assert!(journal.list(0).unwrap().is_empty());
    }
}
