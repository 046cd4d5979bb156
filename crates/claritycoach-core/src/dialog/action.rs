use serde::{Deserialize, Serialize};

/// Side effect a turn asked for. The engine applies timer actions to the
/// session's own timer and journal actions to the host's journal store;
/// the list is also returned so hosts can mirror them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    StartTimer { minutes: u32 },
    StopTimer,
    AppendJournal { text: String },
    WeeklySummary,
}
