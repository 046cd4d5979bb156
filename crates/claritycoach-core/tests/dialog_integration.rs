//! End-to-end chat flows through the public API, backed by SQLite.

use claritycoach_core::dialog::{composer, offer, Action, Route};
use claritycoach_core::fallback::{KbEntry, KnowledgeBase};
use claritycoach_core::journal::{current_streak, entry_dates, JournalStore};
use claritycoach_core::{
    Database, Dialog, DialogConfig, IntentLabel, OfferState, SessionContext, TimerPhase, Turn,
};
use chrono::Utc;

fn chat(
    dialog: &Dialog,
    ctx: SessionContext,
    db: &mut Database,
    text: &str,
) -> (SessionContext, claritycoach_core::TurnReply) {
    let (ctx, reply) = dialog.handle_turn(ctx, &Turn::new(text), db).unwrap();
    db.log_turn(text, &reply.intent_tag(), reply.escalated).unwrap();
    (ctx, reply)
}

#[test]
fn offer_to_journal_to_summary() {
    let dialog = Dialog::default();
    let mut db = Database::open_memory().unwrap();
    let ctx = SessionContext::new();

    let (ctx, reply) = chat(&dialog, ctx, &mut db, "I'm so worried about my exams");
    assert_eq!(
        reply.labels,
        vec![IntentLabel::AnxietyWorry, IntentLabel::WorkSchoolPerformance]
    );
    assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);

    let (ctx, _) = chat(&dialog, ctx, &mut db, "a journal note");
    assert_eq!(ctx.offer, OfferState::AwaitingJournalText);

    let (ctx, reply) = chat(&dialog, ctx, &mut db, "Exam on Friday, sleep has been rough.");
    assert_eq!(ctx.offer, OfferState::None);
    assert_eq!(
        reply.actions,
        vec![Action::AppendJournal {
            text: "Exam on Friday, sleep has been rough.".into()
        }]
    );

    let (_, reply) = chat(&dialog, ctx, &mut db, "summarize my week");
    assert!(reply.text.contains("Common themes: exams, sleep"), "{}", reply.text);
    assert!(reply.text.contains("Exam on Friday"), "{}", reply.text);

    assert_eq!(db.turn_count().unwrap(), 4);
    let today = Utc::now().date_naive();
    let entries = db.list(500).unwrap();
    assert_eq!(current_streak(entry_dates(&entries, &Utc), today), 1);
}

#[test]
fn offer_timer_answer_uses_configured_default() {
    let dialog = Dialog::new(DialogConfig {
        offer_timer_minutes: 15,
        ..DialogConfig::default()
    });
    let mut db = Database::open_memory().unwrap();

    let (ctx, reply) = chat(&dialog, SessionContext::new(), &mut db, "feeling so lonely");
    assert!(reply.text.ends_with(&composer::offer_prompt(15)));
    let (ctx, reply) = chat(&dialog, ctx, &mut db, "timer");
    assert_eq!(reply.actions, vec![Action::StartTimer { minutes: 15 }]);
    assert_eq!(ctx.timer.phase(), TimerPhase::Running);
}

#[test]
fn affirmation_then_duration() {
    let dialog = Dialog::default();
    let mut db = Database::open_memory().unwrap();

    let (ctx, _) = chat(&dialog, SessionContext::new(), &mut db, "I feel anxious");
    let (ctx, reply) = chat(&dialog, ctx, &mut db, "yes");
    assert_eq!(reply.text, offer::CHOICE_PROMPT);
    assert_eq!(ctx.offer, OfferState::AwaitingTimerOrJournal);
    let (ctx, reply) = chat(&dialog, ctx, &mut db, "20 min");
    assert_eq!(reply.actions, vec![Action::StartTimer { minutes: 20 }]);
    assert_eq!(ctx.offer, OfferState::None);
}

#[test]
fn panic_and_health_replies_do_not_arm_offer() {
    let dialog = Dialog::default();
    let mut db = Database::open_memory().unwrap();

    let (ctx, reply) = chat(
        &dialog,
        SessionContext::new(),
        &mut db,
        "I'm having a panic attack and I'm stressed",
    );
    assert_eq!(reply.text, composer::PANIC_TEXT);
    assert_eq!(reply.labels, vec![IntentLabel::PanicAttack]);
    assert_eq!(ctx.offer, OfferState::None);

    let (ctx, reply) = chat(&dialog, ctx, &mut db, "I have chest pain");
    assert_eq!(reply.text, composer::HEALTH_TEXT);
    assert_eq!(ctx.offer, OfferState::None);

    let logged = db.recent_turns(2).unwrap();
    assert!(logged.iter().all(|t| t.escalated));
}

#[test]
fn knowledge_base_answers_unmatched_turns() {
    let kb = KnowledgeBase::new(vec![KbEntry {
        title: "Spaced repetition".into(),
        body: "Review flashcards at growing intervals.".into(),
    }]);
    let dialog = Dialog::default().with_fallback(Box::new(kb));
    let mut db = Database::open_memory().unwrap();

    let (_, reply) = chat(
        &dialog,
        SessionContext::new(),
        &mut db,
        "what about flashcards",
    );
    assert_eq!(reply.route, Route::Fallback);
    assert!(reply.text.contains("Review flashcards"), "{}", reply.text);
}

#[test]
fn session_context_survives_kv_roundtrip() {
    let dialog = Dialog::default();
    let mut db = Database::open_memory().unwrap();

    let (ctx, _) = chat(&dialog, SessionContext::new(), &mut db, "I feel sad");
    db.kv_set("chat_session", &serde_json::to_string(&ctx).unwrap())
        .unwrap();

    let raw = db.kv_get("chat_session").unwrap().unwrap();
    let restored: SessionContext = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored.offer, OfferState::AwaitingTimerOrJournal);

    let (ctx, reply) = chat(&dialog, restored, &mut db, "journal");
    assert_eq!(reply.text, offer::JOURNAL_PROMPT);
    assert_eq!(ctx.offer, OfferState::AwaitingJournalText);
}
