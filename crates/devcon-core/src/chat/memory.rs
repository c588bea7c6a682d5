//! Small per-user memory kept next to the chat history.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Facts remembered about the person chatting, stored under its own key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMemory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_data: Map<String, Value>,
    pub last_interaction: DateTime<Utc>,
}

impl UserMemory {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            user_name: None,
            user_data: Map::new(),
            last_interaction: now,
        }
    }

    /// Records an interaction, picking up a self-introduction if the text has one.
    ///
    /// Returns true when the stored name changed.
    pub fn observe_user_text(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        self.last_interaction = now;
        match detect_user_name(text) {
            Some(name) if self.user_name.as_deref() != Some(name.as_str()) => {
                self.user_name = Some(name);
                true
            }
            _ => false,
        }
    }
}

static INTRODUCTION: OnceLock<Option<Regex>> = OnceLock::new();

/// Words that follow "call me" or "my name is" without being a name.
const NOT_A_NAME: [&str; 14] = [
    "a", "an", "the", "not", "back", "later", "when", "if", "please", "just", "maybe", "now",
    "anytime", "whatever",
];

/// Extracts a name from phrases like "my name is Ana" or "call me Jo".
pub fn detect_user_name(text: &str) -> Option<String> {
    let pattern = INTRODUCTION
        .get_or_init(|| Regex::new(r"(?i)\b(?:my name is|call me)\s+(\p{L}[\p{L}'-]*)").ok())
        .as_ref()?;
    pattern.captures_iter(text).find_map(|captures| {
        let word = captures.get(1)?.as_str().trim_end_matches(['-', '\'']);
        let lowered = word.to_lowercase();
        (!NOT_A_NAME.contains(&lowered.as_str())).then(|| word.to_string())
    })
}
