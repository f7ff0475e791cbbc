//! Serializable run configuration.
//!
//! Paths and timeouts are injected through this struct rather than read
//! from ambient globals; the defaults mirror the bare filenames earlier
//! versions of the tool hardcoded (`watchlist.csv`,
//! `previous_alerts.json`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which notifier sink the check run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Platform desktop notification command.
    Desktop,
    /// No notifier; console output is the only announcement.
    None,
}

/// Configuration for a single check run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Watchlist CSV path.
    pub watchlist_path: PathBuf,

    /// Persisted alert snapshot path.
    pub snapshot_path: PathBuf,

    /// Per-call timeout for quote lookups, in seconds.
    pub quote_timeout_secs: u64,

    /// Per-call timeout for notification delivery, in seconds.
    pub notify_timeout_secs: u64,

    /// Notification sink.
    pub notifier: NotifierKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            watchlist_path: PathBuf::from("watchlist.csv"),
            snapshot_path: PathBuf::from("previous_alerts.json"),
            quote_timeout_secs: 10,
            notify_timeout_secs: 5,
            notifier: NotifierKind::Desktop,
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a run configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }
}
