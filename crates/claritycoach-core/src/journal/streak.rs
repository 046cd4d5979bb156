//! Daily journaling streak.

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone};

use super::store::JournalEntry;

/// Count consecutive calendar days with an entry, ending at `today`.
///
/// Counting stops at the first missing day. Dates after `today` are ignored,
/// and a day with no entry today gives 0. One sort, then at most one step
/// per distinct date.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut days: Vec<NaiveDate> = dates.into_iter().filter(|d| *d <= today).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut expected = today;
    let mut streak = 0;
    for day in days {
        if day != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }
    streak
}

/// Distinct calendar dates of `entries` as seen in `tz`.
pub fn entry_dates<Tz: TimeZone>(entries: &[JournalEntry], tz: &Tz) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .map(|e| e.timestamp.with_timezone(tz).date_naive())
        .collect()
}

/// Short label for the chat header.
pub fn streak_pill(streak: u32) -> String {
    if streak == 0 {
        "Let's start a streak".to_string()
    } else {
        format!("{streak}-day streak")
    }
}
