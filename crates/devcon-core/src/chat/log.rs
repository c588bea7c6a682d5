//! Ordered conversation log.

use super::history::HistoryWindow;
use super::turn::{ChatTurn, TurnRole};

/// The ordered sequence of turns making up one conversation.
///
/// Insertion order is conversation order. Individual turns cannot be removed;
/// clearing replaces the whole log with a fresh welcome turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLog {
    turns: Vec<ChatTurn>,
}

impl MessageLog {
    /// A conversation holding only the welcome turn.
    pub fn fresh() -> Self {
        Self {
            turns: vec![ChatTurn::welcome()],
        }
    }

    /// Wraps previously stored turns, seeding a welcome turn when nothing survived.
    pub fn from_turns(turns: Vec<ChatTurn>) -> Self {
        if turns.is_empty() {
            return Self::fresh();
        }
        Self { turns }
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn replace_all(&mut self, turns: Vec<ChatTurn>) {
        self.turns = turns;
    }

    /// Resets to a single welcome turn.
    pub fn reset(&mut self) {
        self.replace_all(vec![ChatTurn::welcome()]);
    }

    pub fn snapshot(&self) -> Vec<ChatTurn> {
        self.turns.clone()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn user_turn_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role() == TurnRole::User)
            .count()
    }

    /// True when the log is exactly the untouched greeting.
    pub fn is_welcome_only(&self) -> bool {
        self.turns.len() == 1 && self.turns[0].is_welcome()
    }

    pub fn history_window(&self, limit: usize) -> HistoryWindow {
        HistoryWindow::from_turns(&self.turns, limit)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::fresh()
    }
}
