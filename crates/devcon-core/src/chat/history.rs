//! Bounded history window sent to the backend for context.

use super::turn::{ChatTurn, TurnRole};
use serde::{Deserialize, Serialize};

/// Number of recent turns forwarded with each question.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// One entry of the history window, stripped down to what the backend reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: TurnRole,
    pub content: String,
}

/// Read-only projection of the most recent turns, oldest first.
///
/// The welcome turn never appears and the window never holds more than the
/// configured number of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryWindow(Vec<HistoryEntry>);

impl HistoryWindow {
    /// Builds the window from a conversation in chronological order.
    pub fn from_turns(turns: &[ChatTurn], limit: usize) -> Self {
        let eligible: Vec<&ChatTurn> = turns.iter().filter(|t| !t.is_welcome()).collect();
        let skip = eligible.len().saturating_sub(limit);

        Self(
            eligible
                .into_iter()
                .skip(skip)
                .map(|turn| HistoryEntry {
                    role: turn.role(),
                    content: turn.content().to_string(),
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.0
    }
}
