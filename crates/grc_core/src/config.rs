//! Web-UI service configuration.
//!
//! # Responsibility
//! - Provide defaults for the application base URL, bounded waits and the
//!   export download directory.
//! - Overlay `GRC_*` environment variables onto the defaults.
//!
//! # Invariants
//! - `base_url` always ends with `/`.
//! - Blank environment values are ignored.

use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "GRC_BASE_URL";
pub const ENV_WAIT_TIMEOUT_MS: &str = "GRC_WAIT_TIMEOUT_MS";
pub const ENV_POLL_INTERVAL_MS: &str = "GRC_POLL_INTERVAL_MS";
pub const ENV_EXPORT_DIR: &str = "GRC_EXPORT_DIR";

const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebUiConfig {
    pub base_url: String,
    /// Upper bound for every polled condition.
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
    /// Directory receiving CSV exports.
    pub export_dir: PathBuf,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            export_dir: env::temp_dir(),
        }
    }
}

impl WebUiConfig {
    /// Defaults overlaid with process environment values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values resolved by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(base_url) = read(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = read(ENV_WAIT_TIMEOUT_MS) {
            config.wait_timeout = parse_millis(ENV_WAIT_TIMEOUT_MS, raw)?;
        }
        if let Some(raw) = read(ENV_POLL_INTERVAL_MS) {
            config.poll_interval = parse_millis(ENV_POLL_INTERVAL_MS, raw)?;
        }
        if let Some(dir) = read(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }
        Ok(config.normalized())
    }

    /// Returns the config with a `/`-terminated base URL.
    pub fn normalized(mut self) -> Self {
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        self
    }
}

fn parse_millis(key: &'static str, raw: String) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}
