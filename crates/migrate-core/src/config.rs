use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::credentials::{DestinationCredentials, SourceCredentials};
use crate::{MigrateError, MigrateResult};

pub const ENV_SOURCE_API_KEY: &str = "TRELLO_API_KEY";
pub const ENV_SOURCE_API_TOKEN: &str = "TRELLO_API_TOKEN";
pub const ENV_DESTINATION_TOKEN: &str = "VIKUNJA_API_KEY";
pub const ENV_DESTINATION_URL: &str = "VIKUNJA_INSTANCE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub destination: DestinationConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

fn default_requests_per_second() -> u32 {
    8
}

fn default_burst() -> u32 {
    1
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/board-migrate/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("board-migrate/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("board-migrate\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the per-user config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", config_path.display(), e)
                    }
                }
            }
        }
        Self::default()
    }

    /// Loads an explicitly requested config file. Unlike [`AppConfig::load`],
    /// a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> MigrateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MigrateError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Overrides config values with non-empty values from `lookup`, keyed by
    /// the environment variable names the migration has always used.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SOURCE_API_KEY) {
            self.source.api_key = Some(v);
        }
        if let Some(v) = get(ENV_SOURCE_API_TOKEN) {
            self.source.api_token = Some(v);
        }
        if let Some(v) = get(ENV_DESTINATION_TOKEN) {
            self.destination.token = Some(v);
        }
        if let Some(v) = get(ENV_DESTINATION_URL) {
            self.destination.base_url = Some(v);
        }
    }

    /// Trello credentials, if both halves are configured.
    pub fn source_credentials(&self) -> Option<SourceCredentials> {
        match (&self.source.api_key, &self.source.api_token) {
            (Some(key), Some(token)) => Some(SourceCredentials::new(key, token)),
            _ => None,
        }
    }

    pub fn destination_credentials(&self) -> MigrateResult<DestinationCredentials> {
        let base_url = self.destination.base_url.as_deref().ok_or_else(|| {
            MigrateError::Config(format!(
                "destination base_url is not set (config file or {})",
                ENV_DESTINATION_URL
            ))
        })?;
        let token = self.destination.token.as_deref().ok_or_else(|| {
            MigrateError::Config(format!(
                "destination token is not set (config file or {})",
                ENV_DESTINATION_TOKEN
            ))
        })?;
        Ok(DestinationCredentials::new(base_url, token))
    }

    pub fn validate_for_upload(&self) -> MigrateResult<()> {
        self.destination_credentials()?;
        if self.upload.requests_per_second == 0 || self.upload.burst == 0 {
            return Err(MigrateError::Config(
                "upload.requests_per_second and upload.burst must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
