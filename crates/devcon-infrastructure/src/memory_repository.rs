//! Persistence of the optional per-user memory record.

use devcon_core::chat::UserMemory;
use devcon_core::error::Result;
use devcon_core::store::{KeyValueStore, MEMORY_KEY};
use std::sync::Arc;

/// Reads and writes [`UserMemory`] under [`MEMORY_KEY`].
#[derive(Clone)]
pub struct UserMemoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserMemoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns `None` when nothing (or nothing parseable) is stored.
    pub fn load(&self) -> Result<Option<UserMemory>> {
        let Some(bytes) = self.store.load(MEMORY_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(memory) => Ok(Some(memory)),
            Err(err) => {
                tracing::warn!(error = %err, "Stored user memory is invalid; starting fresh");
                Ok(None)
            }
        }
    }

    pub fn save(&self, memory: &UserMemory) -> Result<()> {
        let bytes = serde_json::to_vec(memory)?;
        self.store.save(MEMORY_KEY, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use chrono::Utc;
    use devcon_core::chat::truncate_to_millis;

    #[test]
    fn test_memory_round_trip() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = UserMemoryRepository::new(store);

        let mut memory = UserMemory::new(truncate_to_millis(Utc::now()));
        memory.user_name = Some("Ana".into());
        memory
            .user_data
            .insert("chapter".into(), serde_json::json!("Manila"));

        repo.save(&memory).unwrap();
        assert_eq!(repo.load().unwrap(), Some(memory));
    }

    #[test]
    fn test_invalid_memory_loads_none() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.insert_raw(MEMORY_KEY, "[]").unwrap();
        let repo = UserMemoryRepository::new(store);

        assert_eq!(repo.load().unwrap(), None);
    }
}
