//! Conversation turn types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the synthetic greeting that opens every fresh conversation.
pub const WELCOME_TURN_ID: &str = "welcome";

/// Greeting shown when the conversation holds no user input yet.
pub const WELCOME_MESSAGE: &str = "👋 Hello! I'm DEVCON AI, your developer assistant. Ask me anything about coding, development, or tech concepts!";

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Message typed by the person using the client.
    User,
    /// Message produced by (or on behalf of) the remote assistant.
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix used when minting a turn id. The prefix doubles as the role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnTag {
    User,
    Assistant,
    /// Interim assistant message emitted while the backend warms up.
    Notice,
    /// Assistant apology appended after a failed request.
    Error,
}

impl TurnTag {
    fn prefix(&self) -> &'static str {
        match self {
            TurnTag::User => "user",
            TurnTag::Assistant => "assistant",
            TurnTag::Notice => "notice",
            TurnTag::Error => "error",
        }
    }

    fn role(&self) -> TurnRole {
        match self {
            TurnTag::User => TurnRole::User,
            TurnTag::Assistant | TurnTag::Notice | TurnTag::Error => TurnRole::Assistant,
        }
    }
}

/// A single, immutable message in a conversation.
///
/// Fields are private so a turn cannot be edited after creation; corrections
/// are modelled as new turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    id: String,
    role: TurnRole,
    content: String,
    timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Rebuilds a turn from already-validated parts (e.g. when loading storage).
    pub fn from_parts(
        id: impl Into<String>,
        role: TurnRole,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// The greeting turn that seeds an empty conversation.
    pub fn welcome() -> Self {
        Self::from_parts(
            WELCOME_TURN_ID,
            TurnRole::Assistant,
            WELCOME_MESSAGE,
            truncate_to_millis(Utc::now()),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_TURN_ID
    }
}

/// Mints turn ids of the form `<tag>-<unix millis>`.
///
/// Millisecond stamps are forced to be strictly increasing so ids stay unique
/// and sort in creation order even when two turns land in the same millisecond.
#[derive(Debug, Default, Clone)]
pub struct TurnIdGenerator {
    last_millis: i64,
}

impl TurnIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure ids minted later sort after `turn`.
    pub fn observe(&mut self, turn: &ChatTurn) {
        self.last_millis = self.last_millis.max(turn.timestamp.timestamp_millis());
    }

    /// Creates a new turn stamped with the next free millisecond.
    pub fn mint(&mut self, tag: TurnTag, content: impl Into<String>) -> ChatTurn {
        let now = Utc::now().timestamp_millis();
        let millis = if now <= self.last_millis {
            self.last_millis + 1
        } else {
            now
        };
        self.last_millis = millis;

        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_else(|| truncate_to_millis(Utc::now()));
        ChatTurn::from_parts(
            format!("{}-{}", tag.prefix(), millis),
            tag.role(),
            content,
            timestamp,
        )
    }
}

/// Drops sub-millisecond precision so a timestamp survives an ISO-8601 round trip.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
