//! Explicit command phrases and small entity extractors.
//!
//! Commands are recognized on the normal turn path after escalation and
//! before topical resolution, so "start a 25 minute focus timer" runs the
//! timer instead of being read as a productivity mood.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::patterns::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Soften the text after `rewrite kindly:`.
    RewriteKindly { body: String },
    /// Append a journal note. `None` when the turn is a bare request such as
    /// "add a journal note" with nothing to save.
    JournalAdd { text: Option<String> },
    WeeklySummary,
    FocusPhoneTips,
    TimerStart { minutes: Option<u32> },
    TimerStop,
    TimerStatus,
    StudyPlan,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static command pattern must compile")
}

static AFFIRM_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^\s*(sure|ok|okay|yes|yeah|yep|yup|go ahead|please)\s*[.!]?\s*$"));
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)(\d+)\s*(minutes|minute|mins|min|m|hours|hour|hrs|hr|h)\b"));
static REWRITE_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?is)^\s*(?:rewrite|paraphrase)\s+kindly\s*:?\s*(.*)$"));
static JOURNAL_ADD_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(add|save|put|log)\b.*\b(journal|note)\b"));
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(summarize|summarise|summary)\b.*\b(week|weekly)\b|\bweekly (summary|recap)\b")
});
static START_TIMER_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(start|begin|run|set)\b.*\b(timer|pomodoro)\b"));
static STOP_TIMER_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(stop|end|cancel)\b.*\b(timer|pomodoro)\b"));
static STATUS_TIMER_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(status|remaining|how much|left)\b.*\b(timer|pomodoro)\b"));
static TIMER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\b(timer|pomodoro)\b"));
static STUDY_PLAN_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(study|exam|revision)\s+plan\b"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"\b(phone|mobile)\b"));
static WITHOUT_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(\bwithout\b|\bw/o\b|\bno\b)"));
static OFFER_TIMER_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(timer|focus|pomodoro|countdown)\b"));
static OFFER_JOURNAL_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(journal|note|write|diary)\b"));
static NEGATION_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(no|not|never|nah|don't|dont|do not)\b"));
static JOURNAL_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(add|save|put|log|write|a|an|the|this|that|to|in|into|my|new|quick|journal|note|entry|please|can|could|you|i)\b")
});
static GREETING_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(hi|hello|hey|good (morning|afternoon|evening))\b"));
static GOODBYE_RE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(bye|goodbye|see you|good night)\b"));

/// Detect an explicit command. Rules run most-specific first.
pub fn detect_command(text: &str) -> Option<Command> {
    if let Some(caps) = REWRITE_RE.captures(text) {
        let body = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        return Some(Command::RewriteKindly {
            body: body.to_string(),
        });
    }

    let t = normalize(text);

    if JOURNAL_ADD_RE.is_match(&t) {
        return Some(Command::JournalAdd {
            text: journal_body(text, &t),
        });
    }
    if SUMMARY_RE.is_match(&t) || t == "summarize my week" {
        return Some(Command::WeeklySummary);
    }
    // Phone-free focus tips must win over the timer rules below.
    if t.contains("focus") && PHONE_RE.is_match(&t) && WITHOUT_RE.is_match(&t) {
        return Some(Command::FocusPhoneTips);
    }
    if t.contains("/timer")
        || START_TIMER_RE.is_match(&t)
        || (TIMER_WORD_RE.is_match(&t) && DURATION_RE.is_match(&t))
    {
        return Some(Command::TimerStart {
            minutes: extract_minutes(&t),
        });
    }
    if STOP_TIMER_RE.is_match(&t) {
        return Some(Command::TimerStop);
    }
    if STATUS_TIMER_RE.is_match(&t) {
        return Some(Command::TimerStatus);
    }
    if STUDY_PLAN_RE.is_match(&t) {
        return Some(Command::StudyPlan);
    }
    None
}

/// Text to save for a journal request: what follows a `:`, else the whole
/// turn. `None` when nothing but request words remain.
fn journal_body(text: &str, normalized: &str) -> Option<String> {
    if let Some((_, rest)) = text.split_once(':') {
        let rest = rest.trim();
        return (!rest.is_empty()).then(|| rest.to_string());
    }
    let leftover = JOURNAL_FILLER_RE.replace_all(normalized, "");
    if leftover.chars().any(char::is_alphanumeric) {
        Some(text.trim().to_string())
    } else {
        None
    }
}

/// `keyword` occurs at least once without a negation earlier in the same
/// clause, so "no, the timer" chooses the timer and "I don't want a timer"
/// does not.
fn chosen(keyword: &Regex, text: &str) -> bool {
    let text = normalize(text);
    keyword.find_iter(&text).any(|m| {
        let clause = text[..m.start()]
            .rsplit(|c: char| matches!(c, ',' | '.' | ';' | '!' | '?'))
            .next()
            .unwrap_or_default();
        !NEGATION_RE.is_match(clause)
    })
}

/// First explicit duration in the text, in minutes. Hours are converted.
pub fn extract_minutes(text: &str) -> Option<u32> {
    let caps = DURATION_RE.captures(text)?;
    let n: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_lowercase();
    if unit.starts_with('h') {
        Some(n.saturating_mul(60))
    } else {
        Some(n)
    }
}

/// The whole turn is a bare yes/ok.
pub fn is_affirmation(text: &str) -> bool {
    AFFIRM_RE.is_match(text)
}

/// Reply to a pending timer-or-journal offer asks for the timer.
pub fn wants_timer(text: &str) -> bool {
    chosen(&OFFER_TIMER_RE, text) || chosen(&DURATION_RE, text)
}

/// Reply to a pending timer-or-journal offer asks for the journal.
pub fn wants_journal(text: &str) -> bool {
    chosen(&OFFER_JOURNAL_RE, text)
}

pub fn is_greeting(text: &str) -> bool {
    GREETING_RE.is_match(text)
}

pub fn is_goodbye(text: &str) -> bool {
    GOODBYE_RE.is_match(text)
}
