//! Deterministic weekly summary and theme tagging over journal entries.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::store::JournalEntry;

/// Longest excerpt of the most recent note shown in a summary, in chars.
pub const EXCERPT_CHARS: usize = 120;

pub const EMPTY_SUMMARY: &str =
    "No journal entries yet. Try writing a one-line note each day, then I can summarize your week.";

const THEMES: [(&str, &[&str]); 5] = [
    ("exams", &["exam", "test", "quiz", "assignment"]),
    ("sleep", &["sleep", "tired"]),
    ("focus", &["focus", "phone", "distraction"]),
    ("anxiety", &["anxiety", "anxious", "panic"]),
    ("stress", &["stress", "overwhelm"]),
];

/// Theme tags for one note, at most three.
pub fn tag_hints(text: &str) -> Vec<&'static str> {
    let t = text.to_lowercase();
    THEMES
        .iter()
        .filter(|(_, keys)| keys.iter().any(|k| t.contains(k)))
        .map(|(tag, _)| *tag)
        .take(3)
        .collect()
}

/// Summarize the entries written in the seven days before `now`.
///
/// `entries` may be in any order. Days are counted, and the latest entry
/// is shown, in `tz`, the same zone the streak uses.
pub fn weekly_summary<Tz>(entries: &[JournalEntry], now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let since = now - Duration::days(7);
    let mut week: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| e.timestamp > since && e.timestamp <= now)
        .collect();
    if week.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    week.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut days: Vec<_> = week
        .iter()
        .map(|e| e.timestamp.with_timezone(tz).date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let mut themes: Vec<&str> = Vec::new();
    for entry in &week {
        for tag in tag_hints(&entry.text) {
            if !themes.contains(&tag) {
                themes.push(tag);
            }
        }
    }
    let themes = if themes.is_empty() {
        "varied".to_string()
    } else {
        themes.join(", ")
    };

    let latest = week[0];
    let lines = [
        "**This week at a glance**".to_string(),
        format!(
            "- {} entries across {} day(s). Latest entry: {}.",
            week.len(),
            days.len(),
            latest.timestamp.with_timezone(tz).format("%a %b %d %H:%M")
        ),
        format!("- Common themes: {themes}."),
        format!("- Recent note: _{}_", excerpt(&latest.text)),
        String::new(),
        "**Tiny next steps**".to_string(),
        "- Keep a one-line journal daily for momentum.".to_string(),
        "- Run one 10-25 minute focus block on something that matters.".to_string(),
        "- If stressed: brain-dump for 2 minutes, then choose one small next move.".to_string(),
    ];
    lines.join("\n")
}

fn excerpt(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= EXCERPT_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}…")
}
