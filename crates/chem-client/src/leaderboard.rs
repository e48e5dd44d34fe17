//! `POST /submit-score` and `GET /leaderboard`.

use chem_core::entities::CompoundEntry;
use chem_core::traits::LeaderboardStore;
use serde::Deserialize;

use crate::{ClientError, LabClient, http::check_response};

#[derive(Deserialize)]
struct SubmitBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LeaderboardBody {
    leaderboard: Option<Vec<CompoundEntry>>,
}

impl LabClient {
    /// Append a compound to the shared leaderboard.
    ///
    /// Any leaderboard echoed back in the response is ignored. Callers re-read
    /// with [`Self::fetch_leaderboard`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body carries an `error`.
    pub async fn submit_score(&self, entry: &CompoundEntry) -> Result<(), ClientError> {
        let url = self.endpoint("submit-score");
        tracing::debug!(%url, id = %entry.id, nickname = %entry.nickname, "submitting score");
        let resp = self.http.post(&url).json(entry).send().await?;
        let resp = check_response(resp).await?;

        let body: SubmitBody = resp.json().await?;
        if let Some(error) = body.error {
            return Err(ClientError::Malformed(format!("backend reported: {error}")));
        }
        tracing::debug!(message = body.message.as_deref().unwrap_or(""), "score submitted");
        Ok(())
    }

    /// Every submitted compound, in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body has no `leaderboard` array.
    pub async fn fetch_leaderboard(&self) -> Result<Vec<CompoundEntry>, ClientError> {
        let url = self.endpoint("leaderboard");
        let resp = self.http.get(&url).send().await?;
        let resp = check_response(resp).await?;

        let body: LeaderboardBody = resp.json().await?;
        body.leaderboard
            .ok_or_else(|| ClientError::Malformed("missing leaderboard".to_string()))
    }
}

impl LeaderboardStore for LabClient {
    type Error = ClientError;

    async fn append(&self, entry: &CompoundEntry) -> Result<(), ClientError> {
        self.submit_score(entry).await
    }

    async fn list_all(&self) -> Result<Vec<CompoundEntry>, ClientError> {
        self.fetch_leaderboard().await
    }
}
