//! Configuration loaded from `~/.identity-admin/config.toml`.
//!
//! The file is optional; when it does not exist every field falls back to its
//! `Default` value. Command-line flags and `IDENTITY_ADMIN_*` environment
//! variables take precedence over anything set here.

use crate::utils::{default_store_path, get_app_home};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the config file inside the application home
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Store settings (`[store]` table)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path of the JSON store document
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging settings (`[logging]` table)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set (e.g. "info", "debug")
    #[serde(default)]
    pub level: Option<String>,
    /// Emit JSON instead of human-readable lines
    #[serde(default)]
    pub json: Option<bool>,
    /// Log file rotation: daily, hourly, or never
    #[serde(default)]
    pub rotation: Option<String>,
    /// Directory for log files
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AdminConfig {
    /// Store path from the file, or the default location
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(default_store_path)
    }

    /// Log directory from the file, or the default location
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .dir
            .clone()
            .unwrap_or_else(|| get_app_home().join("logs"))
    }
}

/// Canonical path of the config file (`~/.identity-admin/config.toml`)
#[must_use]
pub fn config_path() -> PathBuf {
    get_app_home().join(CONFIG_FILE)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str, path: &Path) -> Result<AdminConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from `path`, returning defaults if the file is absent.
///
/// Runs before logging is initialized, so only `debug!` breadcrumbs are left.
pub fn load_config(path: &Path) -> Result<AdminConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(AdminConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content, path)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
