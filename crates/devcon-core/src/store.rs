//! Persistent key-value store interface.
//!
//! The store is the only state shared beyond a session. It is synchronous and
//! byte-oriented; callers own the encoding of what they put in it.

use crate::error::Result;

/// Key under which the conversation log is persisted.
pub const HISTORY_KEY: &str = "devcon-chat-history";

/// Key under which the optional user memory is persisted.
pub const MEMORY_KEY: &str = "devcon-chat-memory";

/// Synchronous byte storage scoped to one user profile.
///
/// There are no transactional guarantees across keys. Implementations report
/// write failures (quota, I/O) as errors; deciding whether a failure matters
/// is left to the caller.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored bytes, or `None` if the key was never written or was cleared.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value stored under `key`.
    fn save(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes `key`. Clearing a missing key succeeds.
    fn clear(&self, key: &str) -> Result<()>;
}
