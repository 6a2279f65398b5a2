//! Application configuration from environment variables.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default catalog base URL (TheMealDB public v1 API).
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Default delay between requests to the same host. 0 disables spacing.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// User agent sent with every catalog request.
pub fn default_user_agent() -> String {
    format!("MoodEats/{}", env!("CARGO_PKG_VERSION"))
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe catalog, without trailing slash.
    pub base_url: String,
    /// Directory holding persisted key/value data (favorites).
    pub data_dir: PathBuf,
    /// Milliseconds to wait between requests to the same host.
    pub rate_limit_ms: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: Self::default_data_dir(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MOODEATS_API_BASE_URL`: catalog base URL (default: TheMealDB v1)
    /// - `MOODEATS_DATA_DIR`: data directory (default: "~/.moodeats")
    /// - `MOODEATS_RATE_LIMIT_MS`: per-host request spacing in ms (default: 0)
    /// - `MOODEATS_USER_AGENT`: user agent string
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("MOODEATS_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let data_dir = lookup("MOODEATS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_data_dir);

        let rate_limit_ms = match lookup("MOODEATS_RATE_LIMIT_MS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "MOODEATS_RATE_LIMIT_MS".to_string(),
                value,
            })?,
            None => DEFAULT_RATE_LIMIT_MS,
        };

        let user_agent = lookup("MOODEATS_USER_AGENT").unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            data_dir,
            rate_limit_ms,
            user_agent,
        })
    }

    /// Get the default data directory: ~/.moodeats
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".moodeats"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
