//! SQLite-based storage.
//!
//! Provides persistent storage for:
//! - Journal entries (implements [`JournalStore`])
//! - A turn log for simple usage counts
//! - Key-value store for application state such as the CLI session

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::journal::{JournalEntry, JournalStore};

/// One logged chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub id: i64,
    pub user_text: String,
    pub intent: String,
    pub escalated: bool,
    pub created_at: DateTime<Utc>,
}

/// SQLite database for journal and turn storage.
pub struct Database {
    conn: Connection,
}

fn ts(at: DateTime<Utc>) -> String {
    // Fixed width so lexical order in SQL matches time order.
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(id: i64, value: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DatabaseError::CorruptTimestamp { id, value }.into())
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/claritycoach/claritycoach.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("claritycoach.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS journal (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                text      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS turn_log (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                user_text  TEXT NOT NULL,
                intent     TEXT NOT NULL,
                escalated  INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_journal_timestamp ON journal(timestamp);
            CREATE INDEX IF NOT EXISTS idx_turn_log_created_at ON turn_log(created_at);",
        )?;
        Ok(())
    }

    /// Insert a journal entry with an explicit timestamp.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn append_journal_at(&self, text: &str, timestamp: DateTime<Utc>) -> Result<JournalEntry> {
        self.conn.execute(
            "INSERT INTO journal (timestamp, text) VALUES (?1, ?2)",
            params![ts(timestamp), text],
        )?;
        let entry = JournalEntry {
            id: self.conn.last_insert_rowid(),
            timestamp,
            text: text.to_string(),
        };
        Ok(entry)
    }

    pub fn list_journal(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, text FROM journal
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, raw, text) = row?;
            out.push(JournalEntry {
                id,
                timestamp: parse_ts(id, raw)?,
                text,
            });
        }
        Ok(out)
    }

    pub fn journal_count(&self) -> Result<u64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM journal", [], |row| row.get::<_, u64>(0))?;
        Ok(n)
    }

    /// Record one processed turn.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn log_turn(&self, user_text: &str, intent: &str, escalated: bool) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO turn_log (user_text, intent, escalated, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_text, intent, escalated, ts(Utc::now())],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn turn_count(&self) -> Result<u64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM turn_log", [], |row| row.get::<_, u64>(0))?;
        Ok(n)
    }

    /// Most recent turns, newest first.
    pub fn recent_turns(&self, limit: usize) -> Result<Vec<TurnRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_text, intent, escalated, created_at FROM turn_log
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, user_text, intent, escalated, raw) = row?;
            out.push(TurnRecord {
                id,
                user_text,
                intent,
                escalated,
                created_at: parse_ts(id, raw)?,
            });
        }
        Ok(out)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<bool> {
        let n = self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }
}

impl JournalStore for Database {
    fn append(&mut self, text: &str) -> Result<JournalEntry> {
        self.append_journal_at(text, Utc::now())
    }

    fn list(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        self.list_journal(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn journal_lists_newest_first() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.append_journal_at("two days ago", now - Duration::days(2)).unwrap();
        db.append_journal_at("just now", now).unwrap();
        db.append_journal_at("yesterday", now - Duration::days(1)).unwrap();

        let texts: Vec<String> = db.list_journal(10).unwrap().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["just now", "yesterday", "two days ago"]);
        assert_eq!(db.list_journal(1).unwrap().len(), 1);
        assert_eq!(db.journal_count().unwrap(), 3);
    }

    #[test]
    fn journal_text_is_stored_verbatim() {
        let mut db = Database::open_memory().unwrap();
        let text = "  it's \"fine\"\nreally ";
        db.append(text).unwrap();
        assert_eq!(db.list(1).unwrap()[0].text, text);
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO journal (timestamp, text) VALUES ('yesterday-ish', 'x')",
                [],
            )
            .unwrap();
        let err = db.list_journal(5).unwrap_err();
        assert!(err.to_string().contains("yesterday-ish"), "{err}");
    }

    #[test]
    fn turn_log_counts() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.turn_count().unwrap(), 0);
        db.log_turn("hello", "small_talk", false).unwrap();
        db.log_turn("help", "crisis_risk", true).unwrap();
        assert_eq!(db.turn_count().unwrap(), 2);
        let recent = db.recent_turns(1).unwrap();
        assert_eq!(recent[0].intent, "crisis_risk");
        assert!(recent[0].escalated);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        assert!(db.kv_delete("test").unwrap());
        assert!(!db.kv_delete("test").unwrap());
    }
}
