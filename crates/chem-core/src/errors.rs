//! Validation errors for core domain values.
//!
//! Workflow errors (`InvalidState`, `PredictionFailed`, ...) live in
//! `chem-workflow`; transport and storage errors in their own crates.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Nickname was empty after trimming whitespace.
    #[error("nickname must not be empty")]
    EmptyNickname,

    /// Structure notation was empty after trimming whitespace.
    #[error("structure notation must not be empty")]
    EmptyNotation,

    /// IC50 was negative, NaN, or infinite.
    #[error("invalid IC50 value: {0}")]
    InvalidScore(f64),

    /// The OS random source failed while generating an ID.
    #[error("failed to generate id: {0}")]
    IdGeneration(String),
}
