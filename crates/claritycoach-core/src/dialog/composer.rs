//! Response composer.
//!
//! Maps resolved labels to canned reply fragments. Escalation labels get a
//! single fixed safety message; topical labels get one fragment each, and up
//! to two are joined with a blank line in resolver order. Composition is
//! pure: arming the follow-up offer is left to the chat entry point.

use indoc::{formatdoc, indoc};
use serde::{Deserialize, Serialize};

use crate::nlu::IntentLabel;

pub const CRISIS_TEXT: &str = indoc! {"
    **I'm really sorry you're feeling this way, and I'm glad you told me.**

    If you're in immediate danger, please call your local emergency number now.
    You can reach the **988 Suicide & Crisis Lifeline (US)** by calling or texting 988, or at 988lifeline.org.
    Outside the US, your local crisis line can help right away.

    If you can, reach out to someone you trust and let them know how you're feeling. You don't have to carry this alone."};

pub const PANIC_TEXT: &str = indoc! {"
    **It sounds like a panic attack. You're safe to slow down with me for 60 seconds.**

    1) Breathe in for 4, hold for 4, out for 6. Do it three times.
    2) Name 5 things you can see, 4 you can feel, 3 you can hear.
    3) Press your feet into the floor and notice the pressure.
    4) Remind yourself: this feeling peaks and passes, usually within minutes.

    If symptoms don't ease, or you have chest pain or trouble breathing that feels different from panic, contact emergency services."};

pub const HEALTH_TEXT: &str = indoc! {"
    **That sounds like something a medical professional should look at.**

    I can't assess physical symptoms. Please contact a doctor, campus health service, or urgent care.
    If it feels severe or sudden, call your local emergency number now."};

pub const GREETING_TEXT: &str =
    "Hi! I can help with focus routines, journaling, quick tips, or a weekly summary.";
pub const GOODBYE_TEXT: &str = "Take care! Come back anytime.";
pub const SMALL_TALK_TEXT: &str =
    "I'm here and listening. Want to talk something through, start a focus timer, or jot a journal note?";
pub const EMPTY_TURN_TEXT: &str =
    "I'm here. Tell me what's on your mind, or say \"start a 25 minute focus timer\".";

pub const STUDY_PLAN_TEXT: &str = indoc! {"
    **3-Day Realistic Study Plan**

    **Day 1: Understand & Review Basics**
    - Go through all key topics once quickly.
    - Mark areas that feel confusing.
    - Take short notes in your own words.

    **Day 2: Practice & Strengthen**
    - Do sample questions or mock tests on weak areas.
    - Use active recall (test yourself, don't just reread).
    - Revise formulas or concepts you missed yesterday.

    **Day 3: Final Review & Calm Prep**
    - Skim summaries and key notes only.
    - Sleep early, eat well, and skip last-minute cramming.
    - Spend 10-15 minutes visualizing success.

    *Tip:* Use 25-minute focus blocks, then rest 5 minutes. Say \"start a 25 minute focus timer\" and I'll time it."};

pub const FOCUS_PHONE_TIPS: &str = indoc! {"
    **Focus without your phone: quick playbook**

    - Put the phone in another room; turn on Do Not Disturb or airplane mode.
    - Full-screen your work and close unrelated tabs.
    - Work in 10-25 minute blocks, then take a real 5-minute break.
    - Write a one-line target before you start.
    - If urges hit, jot them on a \"later list\" instead of picking up the phone.

    _Say \"start a 25 minute focus timer\" and I'll run it._"};

/// Canned reply built from resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub text: String,
    /// At least one mood-style label was present, so a chat front end should
    /// follow up with the timer-or-journal offer.
    pub offers_follow_up: bool,
}

/// Compose the reply for `labels` (resolver order, at most two used).
pub fn compose(labels: &[IntentLabel]) -> Composition {
    if let Some(escalation) = labels.iter().find(|l| l.is_escalation()) {
        return Composition {
            text: escalation_text(*escalation).to_string(),
            offers_follow_up: false,
        };
    }

    let picked: Vec<IntentLabel> = if labels.is_empty() {
        vec![IntentLabel::SmallTalk]
    } else {
        labels.iter().copied().take(crate::nlu::MAX_LABELS).collect()
    };
    let text = picked
        .iter()
        .map(|l| fragment(*l))
        .collect::<Vec<_>>()
        .join("\n\n");
    Composition {
        text,
        offers_follow_up: picked.iter().any(IntentLabel::offers_follow_up),
    }
}

/// The line appended to a mood reply when the offer is armed.
pub fn offer_prompt(minutes: u32) -> String {
    format!("If it helps, I can start a {minutes}-minute focus timer or add a quick journal note.")
}

fn escalation_text(label: IntentLabel) -> &'static str {
    match label {
        IntentLabel::CrisisRisk => CRISIS_TEXT,
        IntentLabel::PanicAttack => PANIC_TEXT,
        _ => HEALTH_TEXT,
    }
}

fn fragment(label: IntentLabel) -> &'static str {
    match label {
        IntentLabel::AnxietyWorry => indoc! {"
            **It makes sense to feel anxious.**
            Two tiny moves to try:
            1) Try 4-7-8 breathing once.
            2) Write the top worry and a 10-minute first step."},
        IntentLabel::LowMoodDepression => indoc! {"
            **I'm sorry you're feeling low.**
            Two tiny moves to try:
            1) Do one gentle thing: water, stretch, or step outside.
            2) Note one small win from today, however small."},
        IntentLabel::StressOverwhelm => indoc! {"
            **That sounds like a lot to carry.**
            Two tiny moves to try:
            1) Dump everything into a quick 2-minute brain-dump.
            2) Pick a single 10-minute task and start there."},
        IntentLabel::LonelinessIsolation => indoc! {"
            **Feeling disconnected can sting.**
            Two tiny moves to try:
            1) Send a 'thinking of you' message to one person.
            2) Sit near people (library or cafe) for 15-20 minutes."},
        IntentLabel::RelationshipConflict => indoc! {"
            **Conflict with people we care about is draining.**
            Two tiny moves to try:
            1) Write what happened in three neutral sentences, no blame.
            2) Name one thing you need, and one small way to ask for it."},
        IntentLabel::WorkSchoolPerformance => indoc! {"
            **Work and study pressure is real.**
            Two tiny moves to try:
            1) List what's due and circle the single most urgent item.
            2) Break it into a first step you can finish in 10 minutes."},
        IntentLabel::FinancialStress => indoc! {"
            **Money worries can weigh on everything else.**
            Two tiny moves to try:
            1) Write down the one bill or deadline that matters most this week.
            2) Look up one support option (financial aid office, payment plan)."},
        IntentLabel::SleepIssue => indoc! {"
            **Rough sleep makes everything harder.**
            Two tiny moves to try:
            1) Put screens away 30 minutes before bed tonight.
            2) Keep the same wake-up time tomorrow, even if the night was short."},
        IntentLabel::BoredomMotivation => indoc! {"
            **Low motivation happens to everyone.**
            Two tiny moves to try:
            1) Shrink the task until it feels almost too easy.
            2) Commit to just 5 minutes; stopping after that is allowed."},
        IntentLabel::PlanningProductivity => indoc! {"
            **Let's make the plan small and concrete.**
            Two tiny moves to try:
            1) Write your top three for today, in order.
            2) Block the first one into a 25-minute focus session."},
        IntentLabel::GratitudeReflection => indoc! {"
            **That's lovely to hear.**
            Noticing what went well builds momentum.
            Want to save it as a one-line journal note?"},
        IntentLabel::SmallTalk => GREETING_TEXT,
        IntentLabel::CrisisRisk | IntentLabel::PanicAttack | IntentLabel::HealthConcern => {
            escalation_text(label)
        }
    }
}

/// Gentler phrasing for a harsh self-description.
pub fn rewrite_kindly(text: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 6] = [
        ("stupid", "discouraged"),
        ("idiot", "really frustrated"),
        ("failing", "not going the way I hoped"),
        ("fail", "not going as planned"),
        ("hopeless", "really tough"),
        ("useless", "stuck"),
    ];

    let s = text.trim().trim_end_matches('.');
    if s.is_empty() {
        return "Here's a gentler way to put that: I'm having a hard time right now, but I'm learning and trying again.".to_string();
    }
    let mut out = s.to_string();
    for (harsh, soft) in REPLACEMENTS {
        out = out.replace(harsh, soft).replace(&capitalize(harsh), soft);
    }
    formatdoc! {"
        Here's a kinder way to put that:

        **\"{out}.\"**

        You're not alone; progress is messy. What's one tiny step you could try next?",
        out = out,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
