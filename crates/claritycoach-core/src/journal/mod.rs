//! Journal store contract, streaks, and weekly summaries.

mod store;
pub mod streak;
pub mod summary;

pub use store::{JournalEntry, JournalStore, MemoryJournal};
pub use streak::{current_streak, entry_dates, streak_pill};
pub use summary::{tag_hints, weekly_summary};
