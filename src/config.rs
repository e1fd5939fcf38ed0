//! Process configuration: config file settings and environment credentials

use std::path::PathBuf;

use compact_str::CompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::result::{HomewatchError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("homewatch.toml")
    } else {
        PathBuf::from("homewatch.toml")
    }
}

/// Non-secret settings, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomewatchConfig {
    /// URL of the homework status endpoint
    pub endpoint: String,
    /// Seconds to sleep between poll cycles
    pub poll_interval_secs: u64,
    /// Log level override; "Off" disables file logging
    pub log_level: Option<String>,
}

impl Default for HomewatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            log_level: None,
        }
    }
}

impl HomewatchConfig {
    /// Apply `HOMEWATCH_*` environment overrides on top of the file config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("HOMEWATCH_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }

        if let Ok(interval) = std::env::var("HOMEWATCH_POLL_INTERVAL") {
            if let Ok(secs) = interval.parse::<u64>() {
                self.poll_interval_secs = secs;
            }
        }

        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint is required".to_string());
        }
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Secrets read from the environment at startup; never written to disk.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Token for the homework status API
    pub practicum_token: CompactString,
    /// Telegram bot token
    pub telegram_token: CompactString,
    /// Telegram chat to notify
    pub telegram_chat_id: CompactString,
}

impl Credentials {
    /// Read all required credentials, failing on the first missing one.
    ///
    /// An empty value counts as missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            practicum_token: require_env("PRACTICUM_TOKEN")?,
            telegram_token: require_env("TELEGRAM_TOKEN")?,
            telegram_chat_id: require_env("TELEGRAM_CHAT_ID")?,
        })
    }
}

fn require_env(name: &'static str) -> Result<CompactString> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.into()),
        _ => Err(HomewatchError::MissingCredential(name)),
    }
}
