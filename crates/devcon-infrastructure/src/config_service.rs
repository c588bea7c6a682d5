//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` under the config directory and
//! layers overrides on top: defaults, then the file, then the
//! `DEVCON_BACKEND_URL` environment variable, then an explicit override from
//! the command line.

use crate::paths::DevconPaths;
use devcon_core::config::{BACKEND_URL_ENV, ClientConfig, normalize_base_url};
use devcon_core::error::{DevconError, Result};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: DevconPaths,
    backend_override: Option<String>,
    /// Cached configuration; `None` until first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: DevconPaths) -> Self {
        Self {
            paths,
            backend_override: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Backend URL that wins over every other source (e.g. `--backend-url`).
    pub fn with_backend_override(mut self, url: Option<String>) -> Self {
        self.backend_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Gets the configuration, loading it if not cached.
    ///
    /// A broken config file is logged and replaced by defaults so the client
    /// still starts.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "[ConfigService] Falling back to default configuration");
            self.apply_overrides(ClientConfig::default())
        });

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Reads the config file (if any) and applies overrides, without caching.
    pub fn load_config(&self) -> Result<ClientConfig> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| DevconError::config(e.to_string()))?;
        let base = read_config_file(&path)?;
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, config: ClientConfig) -> ClientConfig {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        resolve_backend_url(config, env_url, self.backend_override.clone())
    }
}

/// Parses a config file, treating a missing file as all defaults.
pub fn read_config_file(path: &Path) -> Result<ClientConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::debug!("[ConfigService] Loaded config from {:?}", path);
            toml::from_str(&contents)
                .map_err(|e| DevconError::config(format!("Invalid {}: {}", path.display(), e)))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Applies the environment and command-line backend URLs, later sources winning.
pub fn resolve_backend_url(
    mut config: ClientConfig,
    env_url: Option<String>,
    cli_url: Option<String>,
) -> ClientConfig {
    for url in [env_url, cli_url].into_iter().flatten() {
        if !url.trim().is_empty() {
            config.backend_url = url;
        }
    }
    config.backend_url = normalize_base_url(&config.backend_url);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = read_config_file(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "backend_url = \"http://localhost:8000/\"\nhistory_window = 4\n",
        )
        .unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.history_window, 4);
        assert_eq!(config.degraded_delay_ms, 2000);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "history_window = \"many\"").unwrap();

        assert!(matches!(
            read_config_file(&path),
            Err(DevconError::Config(_))
        ));
    }

    #[test]
    fn test_override_order() {
        let base = ClientConfig::default().with_backend_url("http://file/");

        let only_file = resolve_backend_url(base.clone(), None, None);
        assert_eq!(only_file.backend_url, "http://file");

        let env = resolve_backend_url(base.clone(), Some("http://env".into()), None);
        assert_eq!(env.backend_url, "http://env");

        let cli = resolve_backend_url(base.clone(), Some("http://env".into()), Some("http://cli/".into()));
        assert_eq!(cli.backend_url, "http://cli");

        let blank_env = resolve_backend_url(base, Some("  ".into()), None);
        assert_eq!(blank_env.backend_url, "http://file");
    }

    #[test]
    fn test_service_caches_until_invalidated() {
        let temp = TempDir::new().unwrap();
        let paths = DevconPaths::new(Some(temp.path().to_path_buf()));
        let service =
            ConfigService::new(paths.clone()).with_backend_override(Some("http://cli".into()));

        let first = service.get_config();
        assert_eq!(first.backend_url, "http://cli");
        assert_eq!(first.history_window, 10);

        let config_file = paths.config_file().unwrap();
        std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
        std::fs::write(&config_file, "history_window = 3\n").unwrap();
        assert_eq!(service.get_config().history_window, 10);

        service.invalidate_cache();
        assert_eq!(service.get_config().history_window, 3);
    }
}
