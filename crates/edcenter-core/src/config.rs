//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the backend base URL, request timeout, refresh behavior, where session
//! credentials are kept, and the last email used to sign in.
//!
//! Configuration is stored at `~/.config/edcenter/config.json`. The
//! `EDCENTER_API_BASE_URL` environment variable overrides the base URL.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{ClientSettings, RefreshMode, DEFAULT_BASE_URL};
use crate::auth::{FileSessionStore, KeyringSessionStore, SessionStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "edcenter";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "EDCENTER_API_BASE_URL";

/// Where session credentials are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub refresh_mode: RefreshMode,
    #[serde(default)]
    pub session_backend: SessionBackend,
    #[serde(default)]
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL from the environment, then the config file, then the default
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn client_settings(&self) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            base_url: self.base_url(),
            timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            refresh_mode: self.refresh_mode,
        }
    }

    /// Build the session store selected by `session_backend`
    pub fn session_store(&self) -> Result<Arc<dyn SessionStore>> {
        Ok(match self.session_backend {
            SessionBackend::File => Arc::new(FileSessionStore::new(self.cache_dir()?)),
            SessionBackend::Keyring => Arc::new(KeyringSessionStore::default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.api_base_url.is_none());
        assert_eq!(config.refresh_mode, RefreshMode::Coalesced);
        assert_eq!(config.session_backend, SessionBackend::File);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edcenter").join("config.json");
        let config = Config {
            api_base_url: Some("https://center.example.com/api".to_string()),
            request_timeout_secs: Some(5),
            refresh_mode: RefreshMode::PerRequest,
            session_backend: SessionBackend::Keyring,
            last_email: Some("admin@example.com".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, config.api_base_url);
        assert_eq!(loaded.refresh_mode, RefreshMode::PerRequest);
        assert_eq!(loaded.session_backend, SessionBackend::Keyring);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"per_request\""));
        assert!(raw.contains("\"keyring\""));
    }

    #[test]
    fn test_base_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_base_url(None), DEFAULT_BASE_URL);

        config.api_base_url = Some("https://file.example.com/api".to_string());
        assert_eq!(config.resolve_base_url(None), "https://file.example.com/api");
        assert_eq!(
            config.resolve_base_url(Some("https://env.example.com/api".to_string())),
            "https://env.example.com/api"
        );
        assert_eq!(
            config.resolve_base_url(Some("  ".to_string())),
            "https://file.example.com/api"
        );
    }

    #[test]
    fn test_client_settings_timeout() {
        let config = Config {
            request_timeout_secs: Some(7),
            ..Default::default()
        };
        assert_eq!(config.client_settings().timeout, Duration::from_secs(7));
        assert_eq!(
            Config::default().client_settings().timeout,
            ClientSettings::default().timeout
        );
    }
}
