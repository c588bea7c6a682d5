//! Client configuration.

use crate::chat::DEFAULT_HISTORY_WINDOW;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend used when neither the build nor the environment names one.
pub const FALLBACK_BACKEND_URL: &str = "https://devcon-onboarding-rag.onrender.com";

/// Environment variable naming the backend base URL (read at build and run time).
pub const BACKEND_URL_ENV: &str = "DEVCON_BACKEND_URL";

/// Google Drive folder indexed by the remote service.
pub const DEFAULT_DRIVE_FOLDER_ID: &str = "1eocL8T8BH6EwnP5siOtDz3FG2CqGHveS";

/// Per-origin storage capacity assumed for the persistent store.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Backend base URL baked in at build time, if any.
pub fn default_backend_url() -> String {
    option_env!("DEVCON_BACKEND_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(FALLBACK_BACKEND_URL)
        .to_string()
}

/// Strips trailing slashes so endpoint paths can be appended verbatim.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Settings shared by the chat REPL and the dashboard CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    /// Path probed once per session to decide between the immediate and delayed paths.
    pub status_path: String,
    pub history_window: usize,
    pub degraded_delay_ms: u64,
    pub storage_quota_bytes: usize,
    pub drive_folder_id: String,
    pub rebuild_batch_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            status_path: "/api/v1/status".to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            degraded_delay_ms: 2000,
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            drive_folder_id: DEFAULT_DRIVE_FOLDER_ID.to_string(),
            rebuild_batch_size: 25,
        }
    }
}

impl ClientConfig {
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Joins an endpoint path onto the normalised base URL.
    pub fn endpoint(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        format!("{}{}", normalize_base_url(&self.backend_url), path)
    }

    pub fn degraded_delay(&self) -> Duration {
        Duration::from_millis(self.degraded_delay_ms)
    }
}
