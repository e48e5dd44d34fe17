//! Workflow error types.
//!
//! Every variant is recoverable: the session survives and the caller shows a
//! transient notification.

use chem_core::enums::Phase;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    /// Bad user input (blank nickname, unusable structure).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Action requested out of sequence.
    #[error("cannot {action} in phase '{phase}': {reason}")]
    InvalidState {
        action: &'static str,
        phase: Phase,
        reason: &'static str,
    },

    /// The predictor failed or returned unusable data.
    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    /// The store rejected or failed to persist the entry.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// The full leaderboard could not be read.
    #[error("leaderboard unavailable: {0}")]
    LeaderboardUnavailable(String),
}
