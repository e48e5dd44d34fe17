//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the lab backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// The backend's `error` field, or the raw body.
        message: String,
    },

    /// The response body was missing fields or carried the wrong types.
    #[error("malformed response: {0}")]
    Malformed(String),
}
