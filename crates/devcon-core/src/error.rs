//! Error types for the DEVCON chat client.

use thiserror::Error;

/// A shared error type for the whole client.
///
/// Every failure path in the session is recoverable; this type only carries
/// enough structure for callers to decide how to surface it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DevconError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure or non-2xx response from the remote service
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A value did not fit into the persistent store
    #[error("Storage quota exceeded for '{key}': {bytes} bytes (limit {limit})")]
    StorageQuota {
        key: String,
        bytes: usize,
        limit: usize,
    },

    /// Operation not accepted in the current session state
    #[error("Invalid session state: expected {expected}, was {actual}")]
    InvalidState {
        expected: &'static str,
        actual: String,
    },

    /// Submitted text was blank after trimming
    #[error("Message is empty")]
    EmptyInput,

    /// The owning session was torn down
    #[error("Session was unmounted")]
    Cancelled,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DevconError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Transport error
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Creates a JSON serialization error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a storage quota error
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::StorageQuota { .. })
    }

    /// Check if this error came from the persistent store (I/O, quota or encoding).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::StorageQuota { .. } | Self::Serialization { .. }
        )
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DevconError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DevconError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}

impl From<toml::de::Error> for DevconError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DevconError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DevconError>`.
pub type Result<T> = std::result::Result<T, DevconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_mentions_status_when_present() {
        let err = DevconError::transport(Some(503), "service unavailable");
        assert_eq!(
            err.to_string(),
            "Transport error (HTTP 503): service unavailable"
        );

        let err = DevconError::transport(None, "connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn storage_predicate_covers_io_quota_and_encoding() {
        assert!(DevconError::io("disk full").is_storage());
        assert!(
            DevconError::StorageQuota {
                key: "k".into(),
                bytes: 10,
                limit: 5
            }
            .is_storage()
        );
        assert!(DevconError::json("bad").is_storage());
        assert!(!DevconError::EmptyInput.is_storage());
    }

    #[test]
    fn io_errors_convert_with_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: DevconError = io.into();
        assert!(matches!(err, DevconError::Io { ref message } if message.contains("PermissionDenied")));
    }
}
