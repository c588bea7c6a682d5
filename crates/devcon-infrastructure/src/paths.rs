//! Unified path management for the client's files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/devcon-chat/         # Config directory
//! └── config.toml                # Client configuration
//!
//! ~/.local/share/devcon-chat/    # Data directory
//! ├── store/                     # Persistent store, one file per key
//! │   └── devcon-chat-history.json
//! └── logs/
//!     └── devcon-chat.log
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "devcon-chat";

/// Environment variable that relocates every directory under one root.
pub const HOME_OVERRIDE_ENV: &str = "DEVCON_CHAT_HOME";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where configuration, stored conversations and logs live.
///
/// With a base override (tests, or `DEVCON_CHAT_HOME`) everything is placed
/// under `<base>/config` and `<base>/data`; otherwise the platform
/// directories from `dirs` are used.
#[derive(Debug, Clone, Default)]
pub struct DevconPaths {
    base: Option<PathBuf>,
}

impl DevconPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Honors `DEVCON_CHAT_HOME` when set.
    pub fn from_env() -> Self {
        let base = std::env::var_os(HOME_OVERRIDE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(base)
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Directory backing the persistent key-value store.
    pub fn store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("store"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
