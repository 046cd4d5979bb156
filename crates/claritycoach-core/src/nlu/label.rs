use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of categories a turn can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    CrisisRisk,
    PanicAttack,
    HealthConcern,
    AnxietyWorry,
    LowMoodDepression,
    StressOverwhelm,
    LonelinessIsolation,
    RelationshipConflict,
    WorkSchoolPerformance,
    FinancialStress,
    SleepIssue,
    BoredomMotivation,
    PlanningProductivity,
    GratitudeReflection,
    SmallTalk,
}

/// Escalation labels in evaluation order. Any one of them is terminal.
pub const ESCALATION_ORDER: [IntentLabel; 3] = [
    IntentLabel::CrisisRisk,
    IntentLabel::PanicAttack,
    IntentLabel::HealthConcern,
];

/// Topical labels, highest priority first. The sole tie-break between
/// co-occurring topical matches.
pub const TOPICAL_PRIORITY: [IntentLabel; 12] = [
    IntentLabel::AnxietyWorry,
    IntentLabel::LowMoodDepression,
    IntentLabel::StressOverwhelm,
    IntentLabel::LonelinessIsolation,
    IntentLabel::RelationshipConflict,
    IntentLabel::WorkSchoolPerformance,
    IntentLabel::FinancialStress,
    IntentLabel::SleepIssue,
    IntentLabel::BoredomMotivation,
    IntentLabel::PlanningProductivity,
    IntentLabel::GratitudeReflection,
    IntentLabel::SmallTalk,
];

impl IntentLabel {
    pub const ALL: [IntentLabel; 15] = [
        IntentLabel::CrisisRisk,
        IntentLabel::PanicAttack,
        IntentLabel::HealthConcern,
        IntentLabel::AnxietyWorry,
        IntentLabel::LowMoodDepression,
        IntentLabel::StressOverwhelm,
        IntentLabel::LonelinessIsolation,
        IntentLabel::RelationshipConflict,
        IntentLabel::WorkSchoolPerformance,
        IntentLabel::FinancialStress,
        IntentLabel::SleepIssue,
        IntentLabel::BoredomMotivation,
        IntentLabel::PlanningProductivity,
        IntentLabel::GratitudeReflection,
        IntentLabel::SmallTalk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::CrisisRisk => "crisis_risk",
            IntentLabel::PanicAttack => "panic_attack",
            IntentLabel::HealthConcern => "health_concern",
            IntentLabel::AnxietyWorry => "anxiety_worry",
            IntentLabel::LowMoodDepression => "low_mood_depression",
            IntentLabel::StressOverwhelm => "stress_overwhelm",
            IntentLabel::LonelinessIsolation => "loneliness_isolation",
            IntentLabel::RelationshipConflict => "relationship_conflict",
            IntentLabel::WorkSchoolPerformance => "work_school_performance",
            IntentLabel::FinancialStress => "financial_stress",
            IntentLabel::SleepIssue => "sleep_issue",
            IntentLabel::BoredomMotivation => "boredom_motivation",
            IntentLabel::PlanningProductivity => "planning_productivity",
            IntentLabel::GratitudeReflection => "gratitude_reflection",
            IntentLabel::SmallTalk => "small_talk",
        }
    }

    /// Crisis, panic and health alerts suppress all other handling.
    pub fn is_escalation(&self) -> bool {
        ESCALATION_ORDER.contains(self)
    }

    /// Position in [`TOPICAL_PRIORITY`]; escalation labels sort first.
    pub fn priority_rank(&self) -> usize {
        TOPICAL_PRIORITY
            .iter()
            .position(|l| l == self)
            .map(|p| p + ESCALATION_ORDER.len())
            .or_else(|| ESCALATION_ORDER.iter().position(|l| l == self))
            .unwrap_or(usize::MAX)
    }

    /// Mood-style labels are followed by an offer to start a timer or write
    /// a journal note.
    pub fn offers_follow_up(&self) -> bool {
        !self.is_escalation()
            && !matches!(
                self,
                IntentLabel::GratitudeReflection | IntentLabel::SmallTalk
            )
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntentLabel::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown intent label: {s}"))
    }
}
