//! Maps session snapshots to what a chat view draws.
//!
//! No business logic lives here: the adapter only labels turns, marks the
//! newest one and decides when the view should scroll.

use crate::session::SessionView;
use chrono::{DateTime, Local, Utc};
use devcon_core::chat::{ChatTurn, TurnRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    DevconAi,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::You => "You",
            Speaker::DevconAi => "DEVCON AI",
        }
    }
}

/// Assistant text may carry markdown; user text is shown as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnBody {
    Plain(String),
    Markdown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTurn {
    /// Stable key, the turn id.
    pub key: String,
    pub speaker: Speaker,
    pub body: TurnBody,
    /// Local wall-clock time, `HH:MM`.
    pub time_label: String,
    /// Only the last turn gets the entrance treatment.
    pub is_latest: bool,
}

impl RenderedTurn {
    fn from_turn(turn: &ChatTurn, is_latest: bool) -> Self {
        let (speaker, body) = match turn.role() {
            TurnRole::User => (Speaker::You, TurnBody::Plain(turn.content().to_string())),
            TurnRole::Assistant => (
                Speaker::DevconAi,
                TurnBody::Markdown(turn.content().to_string()),
            ),
        };
        Self {
            key: turn.id().to_string(),
            speaker,
            body,
            time_label: time_label(turn.timestamp()),
            is_latest,
        }
    }
}

/// One redraw of the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub turns: Vec<RenderedTurn>,
    /// Show the "assistant is composing" indicator.
    pub composing: bool,
    /// Key of the turn to scroll to, when the view should move.
    pub scroll_to: Option<String>,
}

/// Builds frames and remembers enough of the previous one to decide scrolling.
#[derive(Debug, Default)]
pub struct PresentationAdapter {
    previous: Option<(usize, bool)>,
}

impl PresentationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&mut self, view: &SessionView) -> RenderFrame {
        let last_index = view.turns.len().saturating_sub(1);
        let turns: Vec<RenderedTurn> = view
            .turns
            .iter()
            .enumerate()
            .map(|(index, turn)| RenderedTurn::from_turn(turn, index == last_index))
            .collect();

        let composing = view.is_pending();
        let current = (turns.len(), composing);
        let scroll_to = if self.previous != Some(current) {
            turns.last().map(|turn| turn.key.clone())
        } else {
            None
        };
        self.previous = Some(current);

        RenderFrame {
            turns,
            composing,
            scroll_to,
        }
    }
}

fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use devcon_core::chat::{MessageLog, SessionAvailability, TurnIdGenerator, TurnTag};

    fn view(log: &MessageLog, state: SessionState) -> SessionView {
        SessionView {
            turns: log.snapshot(),
            state,
            availability: SessionAvailability::Unknown,
        }
    }

    #[test]
    fn test_turns_are_labelled_by_role() {
        let mut ids = TurnIdGenerator::new();
        let mut log = MessageLog::fresh();
        log.append(ids.mint(TurnTag::User, "What is *DEVCON*?"));

        let frame = PresentationAdapter::new().frame(&view(&log, SessionState::Ready));

        assert_eq!(frame.turns[0].speaker.label(), "DEVCON AI");
        assert!(matches!(frame.turns[0].body, TurnBody::Markdown(_)));
        assert_eq!(frame.turns[1].speaker, Speaker::You);
        assert_eq!(frame.turns[1].body, TurnBody::Plain("What is *DEVCON*?".into()));
        assert_eq!(frame.turns[1].time_label.len(), 5);
    }

    #[test]
    fn test_only_newest_turn_is_latest() {
        let mut ids = TurnIdGenerator::new();
        let mut log = MessageLog::fresh();
        log.append(ids.mint(TurnTag::User, "hi"));
        log.append(ids.mint(TurnTag::Assistant, "hello"));

        let frame = PresentationAdapter::new().frame(&view(&log, SessionState::Ready));
        let latest: Vec<bool> = frame.turns.iter().map(|t| t.is_latest).collect();
        assert_eq!(latest, vec![false, false, true]);
    }

    #[test]
    fn test_scrolls_when_turns_or_pending_flag_change() {
        let mut ids = TurnIdGenerator::new();
        let mut log = MessageLog::fresh();
        let mut adapter = PresentationAdapter::new();

        let first = adapter.frame(&view(&log, SessionState::Ready));
        assert_eq!(first.scroll_to.as_deref(), Some("welcome"));

        let unchanged = adapter.frame(&view(&log, SessionState::Ready));
        assert_eq!(unchanged.scroll_to, None);

        let question = ids.mint(TurnTag::User, "hi");
        let key = question.id().to_string();
        log.append(question);
        let pending = adapter.frame(&view(&log, SessionState::AwaitingResponse));
        assert!(pending.composing);
        assert_eq!(pending.scroll_to, Some(key.clone()));

        // The pending flag changing on its own still moves the view.
        let settled = adapter.frame(&view(&log, SessionState::Ready));
        assert!(!settled.composing);
        assert_eq!(settled.scroll_to, Some(key));
    }
}
