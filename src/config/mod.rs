//! Configuration
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults
//! 2. JSON5 file at `$STRAWPOLL_CONFIG` or `<config_dir>/strawpoll/config.json5`
//! 3. `STRAWPOLL_API_URL` / `STRAWPOLL_TIMEOUT` environment variables
//!
//! Command-line flags are applied on top by the binary. The library's poll
//! functions never read any of this on their own.

use crate::logging::LoggingConfig;
use crate::polls::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STRAWPOLL_CONFIG";
/// Env var overriding [`ClientConfig::api_url`].
pub const API_URL_ENV: &str = "STRAWPOLL_API_URL";
/// Env var overriding [`ClientConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "STRAWPOLL_TIMEOUT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// API root for poll requests
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Config {
    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "client.timeoutSecs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("strawpoll/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Resolve the config file path from the environment.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("strawpoll").join("config.json5"))
}

/// Load configuration from the default file location and the process
/// environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(config_path().as_deref(), |key| std::env::var(key).ok())
}

/// Load configuration from `path` (skipped when absent) and apply overrides
/// from `env`.
pub fn load_config_from<F>(path: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) if path.exists() => read_config_file(path)?,
        _ => Config::default(),
    };
    apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config file");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    json5::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn apply_env_overrides<F>(config: &mut Config, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.client.api_url = url;
    }
    if let Some(raw) = env(TIMEOUT_ENV) {
        config.client.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: TIMEOUT_ENV.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}
