//! Backend API connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "cyberchem/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL of the prediction/leaderboard backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check that the base URL is an absolute http(s) URL and the timeout is
    /// non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for `format!("{base}/path")`.
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
