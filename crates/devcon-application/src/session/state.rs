use devcon_core::chat::{ChatTurn, SessionAvailability};
use std::fmt;

/// Lifecycle of a mounted chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Not mounted yet: no history loaded.
    #[default]
    Idle,
    /// Accepting a new submission.
    Ready,
    /// A submission is in flight (possibly still in its degraded-mode delay).
    AwaitingResponse,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Ready => "Ready",
            SessionState::AwaitingResponse => "AwaitingResponse",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot published to observers after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub turns: Vec<ChatTurn>,
    pub state: SessionState,
    pub availability: SessionAvailability,
}

impl SessionView {
    pub fn is_pending(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }
}
