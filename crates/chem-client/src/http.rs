//! Shared HTTP response helpers.
//!
//! The backend reports failures as `{"error": "..."}` with a 4xx/5xx status.
//! [`check_response`] turns those into [`ClientError::Api`], preferring the
//! `error` field over the raw body for the message.

use serde::Deserialize;

use crate::error::ClientError;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Return the response unchanged on success, or [`ClientError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract `error` from a JSON body, falling back to the body itself.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.trim().to_string(), |b| b.error)
}
