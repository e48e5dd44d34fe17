//! Store error types.

use chem_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or appending the JSONL file failed (includes unparseable lines).
    #[error("leaderboard file error: {0}")]
    Io(#[from] std::io::Error),

    /// The entry failed field validation.
    #[error("invalid entry: {0}")]
    Invalid(#[from] CoreError),

    /// An entry with this ID is already on the leaderboard.
    #[error("duplicate entry id: {0}")]
    DuplicateId(String),
}
