//! Lexical matcher.
//!
//! An ordered table of `(label, pattern)` pairs compiled once per process.
//! Matching is plain case-insensitive regex search with word boundaries:
//! no tokenization, stemming, or scoring. The three escalation patterns are
//! tested first and in fixed order; topical patterns are only consulted when
//! none of them match.

use std::sync::LazyLock;

use regex::Regex;

use super::label::IntentLabel;

const CRISIS: &str = r"(?i)\b(suicid(e|al)|kill(ing)? myself|end(ing)? (it all|my life)|want(ed)? to die|wanna die|don't want to (live|be alive|be here)|self[- ]?harm(ing)?|hurt(ing)? myself|cut(ting)? myself|overdos(e|ed|ing)|no reason to live|better off dead)\b";

const PANIC: &str = r"(?i)\b(panic attacks?|panicking|having a panic|(can't|cant|cannot) breathe|hyperventilat(e|ing)|heart (is )?(racing|pounding))\b";

const HEALTH: &str = r"(?i)\b(chest pains?|faint(ed|ing)|passed out|seizures?|(can't|cant) stop (vomiting|throwing up)|coughing (up )?blood|severe (pain|headache)|allergic reaction|(haven't|havent|not) eaten in days|stopped eating)\b";

const TOPICAL: [(IntentLabel, &str); 12] = [
    (
        IntentLabel::AnxietyWorry,
        r"(?i)\b(anxious|anxiety|nervous|worr(y|ied|ying|ies)|uneasy|on edge|scared|afraid|dread(ing)?|overthink(ing)?|panic)\b",
    ),
    (
        IntentLabel::LowMoodDepression,
        r"(?i)\b(sad|depressed|depression|low mood|feeling low|feel(ing)? down|hopeless|empty|miserable|worthless|cry(ing)?|cried|unhappy|heartbroken)\b",
    ),
    (
        IntentLabel::StressOverwhelm,
        r"(?i)\b(stress(ed|ful)?|overwhelm(ed|ing)?|burn(ed|t)?\s*out|too much|exhaust(ed|ion)|tired|fatigued|drained|swamped|under pressure)\b",
    ),
    (
        IntentLabel::LonelinessIsolation,
        r"(?i)\b(lonely|loneliness|alone|isolated|isolation|no friends|left out|nobody (cares|understands)|no one to talk to)\b",
    ),
    (
        IntentLabel::RelationshipConflict,
        r"(?i)\b(argument|argued|arguing|fight(ing)?|fought|break ?up|broke up|boyfriend|girlfriend|partner|roommate|my (mom|dad|parents|family|friend)|conflict|betrayed|cheated)\b",
    ),
    (
        IntentLabel::WorkSchoolPerformance,
        r"(?i)\b(exams?|tests?|quiz(zes)?|assignments?|homework|deadlines?|grades?|gpa|class(es)?|lectures?|professor|teacher|boss|job|workload|interview|thesis|essay)\b",
    ),
    (
        IntentLabel::FinancialStress,
        r"(?i)\b(money|rent|bills?|debt|loans?|broke|afford|tuition|paycheck|financial(ly)?|budget)\b",
    ),
    (
        IntentLabel::SleepIssue,
        r"(?i)\b(sleep(ing)?|slept|insomnia|awake all night|nightmares?|up all night)\b",
    ),
    (
        IntentLabel::BoredomMotivation,
        r"(?i)\b(bored|boring|unmotivated|motivat(e|ed|ion)|procrastinat(e|ing|ion)|lazy|(can't|cant) get started|stuck)\b",
    ),
    (
        IntentLabel::PlanningProductivity,
        r"(?i)\b(plan(ning)?|schedule|organi[sz]e|to-?do|productiv(e|ity)|prioriti[sz]e|focus|routine|time management|get things done)\b",
    ),
    (
        IntentLabel::GratitudeReflection,
        r"(?i)\b(grateful|gratitude|thankful|appreciate|blessed|good day|went well|proud of|happy)\b",
    ),
    (
        IntentLabel::SmallTalk,
        r"(?i)\b(hi|hello|hey|good (morning|afternoon|evening)|how are you|what's up|thanks|thank you|bye|goodbye|see you)\b",
    ),
];

/// Compiled pattern table.
pub struct LexicalMatcher {
    escalation: Vec<(IntentLabel, Regex)>,
    topical: Vec<(IntentLabel, Regex)>,
}

static MATCHER: LazyLock<LexicalMatcher> = LazyLock::new(LexicalMatcher::new);

impl LexicalMatcher {
    fn new() -> Self {
        let escalation = [
            (IntentLabel::CrisisRisk, CRISIS),
            (IntentLabel::PanicAttack, PANIC),
            (IntentLabel::HealthConcern, HEALTH),
        ];
        Self {
            escalation: compile(&escalation),
            topical: compile(&TOPICAL),
        }
    }

    /// Process-wide compiled table.
    pub fn global() -> &'static LexicalMatcher {
        &MATCHER
    }

    /// First escalation label whose pattern matches, in crisis, panic,
    /// health order.
    pub fn escalation_match(&self, text: &str) -> Option<IntentLabel> {
        self.escalation
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(label, _)| *label)
    }

    /// Every topical label whose pattern matches, in table order.
    pub fn topical_matches(&self, text: &str) -> Vec<IntentLabel> {
        self.topical
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(label, _)| *label)
            .collect()
    }

    /// Whether the pattern for `label` matches anywhere in `text`.
    pub fn matches(&self, label: IntentLabel, text: &str) -> bool {
        self.escalation
            .iter()
            .chain(self.topical.iter())
            .any(|(l, re)| *l == label && re.is_match(text))
    }
}

fn compile(raw: &[(IntentLabel, &str)]) -> Vec<(IntentLabel, Regex)> {
    raw.iter()
        .map(|(label, pattern)| {
            let re = Regex::new(pattern).expect("static intent pattern must compile");
            (*label, re)
        })
        .collect()
}

/// Trim, lower-case, and fold typographic apostrophes so `can’t` and
/// `can't` hit the same patterns.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
