use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::new_compound_id;

/// A submitted compound. Never mutated after creation; the leaderboard only
/// ever appends.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CompoundEntry {
    pub id: String,
    /// Display name chosen by the submitter (trimmed, non-empty).
    pub nickname: String,
    /// Structure notation, opaque to this crate.
    pub smiles: String,
    /// Predicted IC50 in µM. Lower is better.
    pub ic50: f64,
    /// Provenance only; never used for ranking.
    pub submitted_at: DateTime<Utc>,
}

impl CompoundEntry {
    /// Build a validated entry with a freshly generated ID.
    ///
    /// The nickname is trimmed before storing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the nickname or notation is blank, the score
    /// is negative or non-finite, or ID generation fails.
    pub fn create(
        nickname: &str,
        smiles: &str,
        ic50: f64,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let nickname = validate_nickname(nickname)?;
        if smiles.trim().is_empty() {
            return Err(CoreError::EmptyNotation);
        }
        let ic50 = validate_ic50(ic50)?;
        Ok(Self {
            id: new_compound_id()?,
            nickname: nickname.to_string(),
            smiles: smiles.to_string(),
            ic50,
            submitted_at,
        })
    }
}

/// Trim a nickname and reject it if nothing is left.
///
/// # Errors
///
/// Returns [`CoreError::EmptyNickname`] for empty or whitespace-only input.
pub fn validate_nickname(nickname: &str) -> Result<&str, CoreError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        Err(CoreError::EmptyNickname)
    } else {
        Ok(trimmed)
    }
}

/// Accept only finite, non-negative IC50 values.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScore`] otherwise.
pub fn validate_ic50(ic50: f64) -> Result<f64, CoreError> {
    if ic50.is_finite() && ic50 >= 0.0 {
        Ok(ic50)
    } else {
        Err(CoreError::InvalidScore(ic50))
    }
}
