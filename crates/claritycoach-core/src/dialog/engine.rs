//! Turn processing.
//!
//! ## Routing order
//!
//! ```text
//! escalation -> pending offer -> empty turn -> explicit command
//!   -> topical labels (may arm the offer) -> small talk -> fallback
//! ```
//!
//! Escalation runs first so a crisis, panic, or health message is never
//! read as an answer to a pending offer. It also clears the offer.
//!
//! State goes in and comes back out: [`Dialog::handle_turn`] takes the
//! session context by value and returns the updated one with the reply. On
//! error the caller still holds its previous context, so a failed journal
//! write never leaves a half-applied turn behind.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::composer::{self, compose, Composition};
use super::context::{ChatMessage, SessionContext};
use super::offer::{self, OfferState, OfferStep, JOURNAL_PROMPT};
use crate::error::Result;
use crate::fallback::{FallbackGenerator, KnowledgeBase};
use crate::journal::{weekly_summary, JournalStore};
use crate::nlu::{self, Command, IntentLabel};
use crate::storage::Config;

pub const JOURNAL_SAVED_TEXT: &str =
    "Saved to your journal. Want a weekly summary? Just say \"summarize my week\".";

/// One user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
}

impl Turn {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Offer,
    EmptyTurn,
    Escalation,
    Command,
    Topical,
    SmallTalk,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReply {
    pub text: String,
    pub route: Route,
    /// Labels from classification; empty when classification was skipped.
    pub labels: Vec<IntentLabel>,
    /// Name of the explicit command, if one ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub actions: Vec<Action>,
    /// A crisis, panic, or health message was returned.
    pub escalated: bool,
}

impl TurnReply {
    fn new(route: Route, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            route,
            labels: Vec::new(),
            command: None,
            actions: Vec::new(),
            escalated: route == Route::Escalation,
        }
    }

    /// Compact tag for turn logs, e.g. `anxiety_worry+sleep_issue` or
    /// `command:timer_start`.
    pub fn intent_tag(&self) -> String {
        match (&self.command, self.route) {
            (Some(name), _) => format!("command:{name}"),
            (None, Route::Offer) => "offer".to_string(),
            (None, Route::EmptyTurn) => "empty".to_string(),
            (None, Route::Fallback) => "fallback".to_string(),
            (None, _) => self
                .labels
                .iter()
                .map(IntentLabel::as_str)
                .collect::<Vec<_>>()
                .join("+"),
        }
    }
}

/// Offline classification of a single text. Never arms an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub text: String,
    pub labels: Vec<IntentLabel>,
    pub defaulted: bool,
    pub reply: String,
}

/// Tunables for turn processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Timer length for "start a timer" with no duration.
    pub default_timer_minutes: u32,
    /// Timer length when the offer is accepted with no duration.
    pub offer_timer_minutes: u32,
    /// Longer requests are clamped to this.
    pub max_timer_minutes: u32,
    /// Messages kept in the session history.
    pub history_limit: usize,
    /// Entries read for a weekly summary.
    pub summary_limit: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            default_timer_minutes: 25,
            offer_timer_minutes: 10,
            max_timer_minutes: crate::timer::DEFAULT_MAX_MINUTES,
            history_limit: 20,
            summary_limit: 50,
        }
    }
}

impl From<&Config> for DialogConfig {
    fn from(config: &Config) -> Self {
        Self {
            default_timer_minutes: config.timer.default_minutes,
            offer_timer_minutes: config.timer.offer_minutes,
            max_timer_minutes: config.timer.max_minutes,
            history_limit: config.dialog.history_limit,
            summary_limit: config.journal.summary_limit,
        }
    }
}

/// Stateless turn router. Holds configuration and the fallback generator;
/// all per-session state lives in [`SessionContext`].
pub struct Dialog {
    config: DialogConfig,
    fallback: Box<dyn FallbackGenerator>,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new(DialogConfig::default())
    }
}

impl Dialog {
    pub fn new(config: DialogConfig) -> Self {
        Self {
            config,
            fallback: Box::new(KnowledgeBase::default()),
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackGenerator>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Process one turn for one session.
    ///
    /// # Errors
    /// Returns an error only if the journal store fails.
    pub fn handle_turn(
        &self,
        mut ctx: SessionContext,
        turn: &Turn,
        journal: &mut dyn JournalStore,
    ) -> Result<(SessionContext, TurnReply)> {
        let limit = self.config.history_limit;
        ctx.push_history(ChatMessage::user(turn.text.clone()), limit);
        let reply = self.route(&mut ctx, turn.text.trim(), journal)?;
        ctx.push_history(ChatMessage::assistant(reply.text.clone()), limit);
        tracing::debug!(
            session = %ctx.session_id,
            route = ?reply.route,
            intent = %reply.intent_tag(),
            offer = ?ctx.offer,
            "turn handled"
        );
        Ok((ctx, reply))
    }

    /// Classify and compose without touching any session state.
    pub fn classify(&self, text: &str) -> Classification {
        let resolution = nlu::resolve(text);
        let Composition { text: reply, .. } = compose(&resolution.labels);
        Classification {
            text: text.to_string(),
            labels: resolution.labels,
            defaulted: resolution.defaulted,
            reply,
        }
    }

    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Classification> {
        texts.iter().map(|t| self.classify(t.as_ref())).collect()
    }

    fn route(
        &self,
        ctx: &mut SessionContext,
        text: &str,
        journal: &mut dyn JournalStore,
    ) -> Result<TurnReply> {
        let resolution = nlu::resolve(text);
        if resolution.is_escalation() {
            tracing::info!(label = %resolution.primary(), offer = ?ctx.offer, "escalation reply");
            ctx.offer = OfferState::None;
            let mut reply = TurnReply::new(Route::Escalation, compose(&resolution.labels).text);
            reply.labels = resolution.labels;
            return Ok(reply);
        }

        match offer::step(ctx.offer, text, self.config.offer_timer_minutes) {
            OfferStep::PassThrough => {}
            OfferStep::Prompt { next, text } => {
                ctx.offer = next;
                return Ok(TurnReply::new(Route::Offer, text));
            }
            OfferStep::Act { action } => {
                ctx.offer = OfferState::None;
                let text = self.apply(ctx, &action, journal)?;
                let mut reply = TurnReply::new(Route::Offer, text);
                reply.actions.push(action);
                return Ok(reply);
            }
            OfferStep::FallThrough => ctx.offer = OfferState::None,
        }

        if text.is_empty() {
            return Ok(TurnReply::new(Route::EmptyTurn, composer::EMPTY_TURN_TEXT));
        }

        if let Some(command) = nlu::detect_command(text) {
            return self.run_command(ctx, command, journal);
        }

        if !resolution.defaulted {
            if resolution.labels == [IntentLabel::SmallTalk] {
                let text = if nlu::is_goodbye(text) {
                    composer::GOODBYE_TEXT
                } else if nlu::is_greeting(text) {
                    composer::GREETING_TEXT
                } else {
                    composer::SMALL_TALK_TEXT
                };
                let mut reply = TurnReply::new(Route::SmallTalk, text);
                reply.labels = resolution.labels;
                return Ok(reply);
            }

            let composition = compose(&resolution.labels);
            let mut text = composition.text;
            if composition.offers_follow_up {
                text.push_str("\n\n");
                text.push_str(&composer::offer_prompt(self.config.offer_timer_minutes));
                ctx.offer = OfferState::AwaitingTimerOrJournal;
            }
            let mut reply = TurnReply::new(Route::Topical, text);
            reply.labels = resolution.labels;
            return Ok(reply);
        }

        let text = self.fallback.generate(&ctx.history);
        let mut reply = TurnReply::new(Route::Fallback, text);
        reply.labels = resolution.labels;
        Ok(reply)
    }

    fn run_command(
        &self,
        ctx: &mut SessionContext,
        command: Command,
        journal: &mut dyn JournalStore,
    ) -> Result<TurnReply> {
        let name = command_name(&command);
        let (text, action) = match command {
            Command::TimerStart { minutes } => {
                let action = Action::StartTimer {
                    minutes: minutes.unwrap_or(self.config.default_timer_minutes),
                };
                (self.apply(ctx, &action, journal)?, Some(action))
            }
            Command::TimerStop => {
                if ctx.timer.stop().is_some() {
                    ("Stopped the timer.".to_string(), Some(Action::StopTimer))
                } else {
                    ("No timer is running.".to_string(), None)
                }
            }
            Command::TimerStatus => {
                // Read progress before the status read, which may reset an
                // expired timer.
                let pct = (ctx.timer.progress_ratio() * 100.0) as u32;
                (format!("{pct}% complete. {}", ctx.timer.status_text()), None)
            }
            Command::JournalAdd { text: Some(body) } => {
                let action = Action::AppendJournal { text: body };
                (self.apply(ctx, &action, journal)?, Some(action))
            }
            Command::JournalAdd { text: None } => {
                ctx.offer = OfferState::AwaitingJournalText;
                (JOURNAL_PROMPT.to_string(), None)
            }
            Command::WeeklySummary => {
                let action = Action::WeeklySummary;
                (self.apply(ctx, &action, journal)?, Some(action))
            }
            Command::RewriteKindly { body } => (composer::rewrite_kindly(&body), None),
            Command::StudyPlan => (composer::STUDY_PLAN_TEXT.to_string(), None),
            Command::FocusPhoneTips => (composer::FOCUS_PHONE_TIPS.to_string(), None),
        };
        let mut reply = TurnReply::new(Route::Command, text);
        reply.command = Some(name.to_string());
        reply.actions.extend(action);
        Ok(reply)
    }

    /// Carry out `action` and return the reply text describing it.
    fn apply(
        &self,
        ctx: &mut SessionContext,
        action: &Action,
        journal: &mut dyn JournalStore,
    ) -> Result<String> {
        match action {
            Action::StartTimer { minutes } => {
                ctx.timer.set_max_minutes(self.config.max_timer_minutes);
                ctx.timer.start(*minutes);
                let effective = ctx.timer.total_secs() / 60;
                Ok(format!("Started a **{effective}-minute** focus timer."))
            }
            Action::StopTimer => {
                ctx.timer.stop();
                Ok("Stopped the timer.".to_string())
            }
            Action::AppendJournal { text } => {
                let entry = journal.append(text)?;
                tracing::info!(entry_id = entry.id, chars = text.chars().count(), "journal entry added");
                Ok(JOURNAL_SAVED_TEXT.to_string())
            }
            Action::WeeklySummary => {
                let entries = journal.list(self.config.summary_limit)?;
                Ok(weekly_summary(&entries, Utc::now(), &Local))
            }
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::RewriteKindly { .. } => "rewrite_kindly",
        Command::JournalAdd { .. } => "journal_add",
        Command::WeeklySummary => "weekly_summary",
        Command::FocusPhoneTips => "focus_phone_tips",
        Command::TimerStart { .. } => "timer_start",
        Command::TimerStop => "timer_stop",
        Command::TimerStatus => "timer_status",
        Command::StudyPlan => "study_plan",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use crate::timer::TimerPhase;

    fn turn(
        dialog: &Dialog,
        ctx: SessionContext,
        text: &str,
        journal: &mut MemoryJournal,
    ) -> (SessionContext, TurnReply) {
        dialog.handle_turn(ctx, &Turn::new(text), journal).unwrap()
    }

    #[test]
    fn mood_turn_arms_offer_and_duration_starts_timer() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(&dialog, SessionContext::new(), "I feel anxious", &mut journal);
        assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);
        assert_eq!(reply.labels, vec![IntentLabel::AnxietyWorry]);
        assert!(reply.text.ends_with(&composer::offer_prompt(10)));

        let (ctx, reply) = turn(&dialog, ctx, "20 min", &mut journal);
        assert_eq!(reply.actions, vec![Action::StartTimer { minutes: 20 }]);
        assert_eq!(ctx.offer, OfferState::None);
        assert_eq!(ctx.timer.phase(), TimerPhase::Running);
        assert_eq!(ctx.timer.total_secs(), 20 * 60);
    }

    #[test]
    fn affirmation_keeps_offer_pending() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "I feel anxious", &mut journal);
        let (ctx, reply) = turn(&dialog, ctx, "ok", &mut journal);
        assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);
        assert_eq!(reply.text, offer::CHOICE_PROMPT);
        assert!(reply.actions.is_empty());
    }

    #[test]
    fn journal_choice_then_text_is_saved() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "so stressed", &mut journal);
        let (ctx, _) = turn(&dialog, ctx, "journal please", &mut journal);
        assert_eq!(ctx.offer, OfferState::AwaitingJournalText);

        let (ctx, reply) = turn(&dialog, ctx, "   ", &mut journal);
        assert_eq!(ctx.offer, OfferState::AwaitingJournalText);
        assert_eq!(reply.text, offer::JOURNAL_EMPTY_PROMPT);

        let (ctx, reply) = turn(&dialog, ctx, "  Exams are piling up.  ", &mut journal);
        assert_eq!(ctx.offer, OfferState::None);
        assert_eq!(reply.text, JOURNAL_SAVED_TEXT);
        assert_eq!(journal.list(1).unwrap()[0].text, "Exams are piling up.");
    }

    #[test]
    fn unrelated_answer_falls_through_to_classification() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "I feel lonely", &mut journal);
        let (ctx, reply) = turn(&dialog, ctx, "I can't sleep at all", &mut journal);
        assert_eq!(reply.route, Route::Topical);
        assert_eq!(reply.labels, vec![IntentLabel::SleepIssue]);
        // The new mood reply re-arms the offer.
        assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);
    }

    #[test]
    fn crisis_beats_pending_offer_fallthrough_and_clears_it() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "I feel anxious", &mut journal);
        let (ctx, reply) = turn(&dialog, ctx, "I want to kill myself", &mut journal);
        assert!(reply.escalated);
        assert_eq!(reply.text, composer::CRISIS_TEXT);
        assert_eq!(ctx.offer, OfferState::None);
    }

    #[test]
    fn crisis_while_awaiting_journal_text_is_escalated_not_saved() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let ctx = SessionContext {
            offer: OfferState::AwaitingJournalText,
            ..SessionContext::new()
        };
        let (ctx, reply) = turn(&dialog, ctx, "I want to kill myself", &mut journal);
        assert!(reply.escalated);
        assert_eq!(reply.text, composer::CRISIS_TEXT);
        assert_eq!(reply.labels, vec![IntentLabel::CrisisRisk]);
        assert_eq!(ctx.offer, OfferState::None);
        assert!(journal.list(10).unwrap().is_empty());
    }

    #[test]
    fn crisis_naming_an_offer_keyword_is_escalated() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "I feel anxious", &mut journal);
        let (ctx, reply) = turn(&dialog, ctx, "I wrote a suicide note", &mut journal);
        assert!(reply.escalated);
        assert_eq!(reply.text, composer::CRISIS_TEXT);
        assert_eq!(ctx.offer, OfferState::None);
    }

    #[test]
    fn panic_naming_focus_does_not_start_offered_timer() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "so stressed", &mut journal);
        assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);
        let (ctx, reply) = turn(
            &dialog,
            ctx,
            "panic attack, I can't breathe or focus",
            &mut journal,
        );
        assert!(reply.escalated);
        assert_eq!(reply.text, composer::PANIC_TEXT);
        assert!(reply.actions.is_empty());
        assert_eq!(ctx.timer.phase(), TimerPhase::Idle);
        assert_eq!(ctx.offer, OfferState::None);
    }

    #[test]
    fn declined_timer_does_not_start_one() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "I feel lonely", &mut journal);
        let (ctx, reply) = turn(&dialog, ctx, "I don't want a timer", &mut journal);
        assert!(reply.actions.is_empty());
        assert_eq!(ctx.timer.phase(), TimerPhase::Idle);
        assert_eq!(ctx.offer, OfferState::None);

        let (ctx, _) = turn(&dialog, ctx, "I feel lonely", &mut journal);
        let (ctx, _) = turn(&dialog, ctx, "I don't want to write", &mut journal);
        assert_ne!(ctx.offer, OfferState::AwaitingJournalText);
    }

    #[test]
    fn crisis_text_mentioning_timer_is_still_escalated() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(
            &dialog,
            SessionContext::new(),
            "start a timer, I want to end my life",
            &mut journal,
        );
        assert!(reply.escalated);
        assert_eq!(ctx.timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn timer_commands_drive_session_timer() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(&dialog, SessionContext::new(), "start a timer", &mut journal);
        assert_eq!(reply.command.as_deref(), Some("timer_start"));
        assert_eq!(ctx.timer.total_secs(), 25 * 60);
        assert_eq!(ctx.offer, OfferState::None);

        let (ctx, reply) = turn(&dialog, ctx, "how much time is left on the timer", &mut journal);
        assert!(reply.text.starts_with("0% complete. "), "{}", reply.text);

        let (ctx, reply) = turn(&dialog, ctx, "stop the timer", &mut journal);
        assert_eq!(reply.actions, vec![Action::StopTimer]);
        assert_eq!(ctx.timer.phase(), TimerPhase::Idle);

        let (_, reply) = turn(&dialog, ctx, "cancel the timer", &mut journal);
        assert_eq!(reply.text, "No timer is running.");
    }

    #[test]
    fn oversized_timer_request_is_clamped() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (_, reply) = turn(
            &dialog,
            SessionContext::new(),
            "start a 500 minute timer",
            &mut journal,
        );
        assert_eq!(reply.text, "Started a **120-minute** focus timer.");
    }

    #[test]
    fn journal_add_without_body_asks_for_text() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(&dialog, SessionContext::new(), "add a journal note", &mut journal);
        assert_eq!(reply.text, JOURNAL_PROMPT);
        assert_eq!(ctx.offer, OfferState::AwaitingJournalText);
        let (_, reply) = turn(&dialog, ctx, "Walked by the lake", &mut journal);
        assert_eq!(
            reply.actions,
            vec![Action::AppendJournal {
                text: "Walked by the lake".into()
            }]
        );
    }

    #[test]
    fn journal_request_without_colon_saves_whole_turn() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(
            &dialog,
            SessionContext::new(),
            "log in my journal that I ran today",
            &mut journal,
        );
        assert_eq!(reply.text, JOURNAL_SAVED_TEXT);
        assert_eq!(ctx.offer, OfferState::None);
        assert_eq!(
            journal.list(1).unwrap()[0].text,
            "log in my journal that I ran today"
        );
    }

    #[test]
    fn weekly_summary_reads_journal() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        journal.append("Quiz prep").unwrap();
        let (_, reply) = turn(&dialog, SessionContext::new(), "summarize my week", &mut journal);
        assert!(reply.text.contains("1 entries across 1 day(s)"), "{}", reply.text);
        assert_eq!(reply.actions, vec![Action::WeeklySummary]);
    }

    #[test]
    fn greeting_goodbye_and_fallback() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(&dialog, SessionContext::new(), "hello", &mut journal);
        assert_eq!(reply.text, composer::GREETING_TEXT);
        assert_eq!(ctx.offer, OfferState::None);

        let (ctx, reply) = turn(&dialog, ctx, "ok bye", &mut journal);
        assert_eq!(reply.text, composer::GOODBYE_TEXT);

        for text in ["thanks", "how are you"] {
            let (_, reply) = turn(&dialog, ctx.clone(), text, &mut journal);
            assert_eq!(reply.route, Route::SmallTalk, "{text}");
            assert_eq!(reply.text, composer::SMALL_TALK_TEXT, "{text}");
        }

        let (_, reply) = turn(&dialog, ctx, "purple elephants", &mut journal);
        assert_eq!(reply.route, Route::Fallback);
        assert_eq!(reply.text, crate::fallback::NOT_SURE_TEXT);
    }

    #[test]
    fn empty_turn_reprompts_without_state_change() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let start = SessionContext::new();
        let (ctx, reply) = turn(&dialog, start.clone(), "   ", &mut journal);
        assert_eq!(reply.route, Route::EmptyTurn);
        assert_eq!(ctx.offer, start.offer);
        assert_eq!(ctx.timer, start.timer);
    }

    #[test]
    fn history_records_both_sides() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, _) = turn(&dialog, SessionContext::new(), "hello", &mut journal);
        assert_eq!(ctx.history.len(), 2);
        assert_eq!(ctx.history[0], ChatMessage::user("hello"));
    }

    #[test]
    fn classify_never_arms_offer() {
        let dialog = Dialog::default();
        let out = dialog.classify_batch(&["I feel anxious", "thanks, grateful today"]);
        assert_eq!(out[0].labels, vec![IntentLabel::AnxietyWorry]);
        assert!(!out[0].reply.contains("focus timer or add"));
        assert_eq!(
            out[1].labels,
            vec![IntentLabel::GratitudeReflection, IntentLabel::SmallTalk]
        );
    }

    #[test]
    fn intent_tags() {
        let dialog = Dialog::default();
        let mut journal = MemoryJournal::new();
        let (ctx, reply) = turn(
            &dialog,
            SessionContext::new(),
            "anxious and can't sleep",
            &mut journal,
        );
        assert_eq!(reply.intent_tag(), "anxiety_worry+sleep_issue");
        let (_, reply) = turn(&dialog, ctx, "/timer", &mut journal);
        assert_eq!(reply.intent_tag(), "offer");
    }
}
