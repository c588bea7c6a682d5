//! In-memory persistent store.

use devcon_core::error::{DevconError, Result};
use devcon_core::store::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Store that lives only as long as the process, with an optional size limit.
///
/// Used in tests and as the fallback when no data directory can be resolved.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw value, bypassing the quota.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().map(|e| e.contains_key(key)).unwrap_or(false)
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|e| DevconError::internal(format!("Store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        if let Some(limit) = self.quota_bytes
            && value.len() > limit
        {
            return Err(DevconError::StorageQuota {
                key: key.to_string(),
                bytes: value.len(),
                limit,
            });
        }
        self.entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
