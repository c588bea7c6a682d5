//! Storage representations of domain types.
//!
//! The stored shape of a turn is `{id, role, content, timestamp}` with the
//! timestamp as an ISO-8601 string, matching what browsers wrote for the
//! same key.

use chrono::{DateTime, SecondsFormat, Utc};
use devcon_core::chat::{ChatTurn, TurnRole};
use serde::{Deserialize, Serialize};

/// A turn as persisted.
///
/// `role` and `timestamp` are kept loose here and validated when converting
/// back, so one bad entry cannot fail the whole array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTurn {
    pub id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

/// Why a stored turn was skipped on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnDecodeError {
    UnknownRole(String),
    BadTimestamp(String),
}

impl std::fmt::Display for TurnDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRole(role) => write!(f, "unknown role '{}'", role),
            Self::BadTimestamp(ts) => write!(f, "unparseable timestamp '{}'", ts),
        }
    }
}

impl From<&ChatTurn> for StoredTurn {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            id: turn.id().to_string(),
            role: turn.role().as_str().to_string(),
            content: turn.content().to_string(),
            timestamp: format_timestamp(turn.timestamp()),
        }
    }
}

impl TryFrom<StoredTurn> for ChatTurn {
    type Error = TurnDecodeError;

    fn try_from(stored: StoredTurn) -> Result<Self, Self::Error> {
        let role = match stored.role.as_str() {
            "user" => TurnRole::User,
            "assistant" => TurnRole::Assistant,
            other => return Err(TurnDecodeError::UnknownRole(other.to_string())),
        };
        let timestamp = parse_timestamp(&stored.timestamp)
            .ok_or_else(|| TurnDecodeError::BadTimestamp(stored.timestamp.clone()))?;
        Ok(ChatTurn::from_parts(stored.id, role, stored.content, timestamp))
    }
}

/// `2024-05-01T09:30:00.123Z`, the shape `Date.prototype.toISOString` produces.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts any RFC 3339 timestamp and normalises it to UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
