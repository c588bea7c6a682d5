//! Chat history persistence over the key-value store.

use crate::dto::StoredTurn;
use devcon_core::chat::ChatTurn;
use devcon_core::error::Result;
use devcon_core::store::{HISTORY_KEY, KeyValueStore};
use serde_json::Value;
use std::sync::Arc;

/// Reads and writes the conversation under [`HISTORY_KEY`].
#[derive(Clone)]
pub struct ChatHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ChatHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the stored conversation.
    ///
    /// Returns `Ok(None)` when nothing usable is stored: the key is absent, or
    /// the value is not a JSON array. Entries that fail validation are dropped
    /// individually. Only a failing store read is an error.
    pub fn load(&self) -> Result<Option<Vec<ChatTurn>>> {
        let Some(bytes) = self.store.load(HISTORY_KEY)? else {
            return Ok(None);
        };

        let entries = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "Stored chat history is not an array; ignoring it");
                return Ok(None);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Stored chat history is not valid JSON; ignoring it");
                return Ok(None);
            }
        };

        let total = entries.len();
        let turns: Vec<ChatTurn> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let stored = match serde_json::from_value::<StoredTurn>(entry) {
                    Ok(stored) => stored,
                    Err(err) => {
                        tracing::warn!(index, error = %err, "Dropping malformed stored turn");
                        return None;
                    }
                };
                match ChatTurn::try_from(stored) {
                    Ok(turn) => Some(turn),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "Dropping invalid stored turn");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(loaded = turns.len(), total, "Loaded chat history");
        Ok(Some(turns))
    }

    pub fn save(&self, turns: &[ChatTurn]) -> Result<()> {
        let stored: Vec<StoredTurn> = turns.iter().map(StoredTurn::from).collect();
        let bytes = serde_json::to_vec(&stored)?;
        self.store.save(HISTORY_KEY, &bytes)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear(HISTORY_KEY)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
