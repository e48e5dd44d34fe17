//! Leaderboard backend, polling, and display settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Where submitted compounds are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardBackend {
    /// The HTTP backend's `submit-score` / `leaderboard` endpoints.
    #[default]
    Remote,
    /// A JSONL file on local disk.
    Local,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".cyberchem/leaderboard.jsonl")
}

const fn default_poll_interval_secs() -> u64 {
    10
}

const fn default_preview_len() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaderboardConfig {
    #[serde(default)]
    pub backend: LeaderboardBackend,

    /// JSONL file used by the local backend.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Refresh interval for `leaderboard --watch`.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Notation longer than this is truncated in table output.
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            backend: LeaderboardBackend::default(),
            store_path: default_store_path(),
            poll_interval_secs: default_poll_interval_secs(),
            preview_len: default_preview_len(),
        }
    }
}

impl LeaderboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "leaderboard.poll_interval_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
