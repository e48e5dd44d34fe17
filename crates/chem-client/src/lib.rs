//! # chem-client
//!
//! HTTP client for the CyberChem Lab backend.
//!
//! Endpoints:
//! - `POST /mol-to-smiles`: molfile → canonical SMILES + IC50
//! - `POST /image-to-smiles`: image upload → SMILES + optional IC50
//! - `POST /submit-score`: append a compound to the leaderboard
//! - `GET /leaderboard`: every submitted compound
//!
//! [`LabClient`] implements the [`Predictor`](chem_core::traits::Predictor),
//! [`ImageScanner`](chem_core::traits::ImageScanner) and
//! [`LeaderboardStore`](chem_core::traits::LeaderboardStore) traits so the
//! workflow controller can drive it directly. Every call is a single
//! request/response; nothing is retried.

mod error;
mod http;
pub mod leaderboard;
pub mod predict;
pub mod scan;

pub use error::ClientError;

use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = "cyberchem/0.1";

/// HTTP client for the prediction and leaderboard backend.
#[derive(Debug, Clone)]
pub struct LabClient {
    http: reqwest::Client,
    base_url: String,
}

impl LabClient {
    /// Create a client for `base_url` with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_options(
            base_url,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )
        .expect("reqwest client should build")
    }

    /// Create a client with an explicit timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` fails to build.
    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}
