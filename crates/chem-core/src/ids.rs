//! Compound ID generation.
//!
//! IDs are `{prefix}-{16 hex chars}` built from 8 random bytes, e.g.
//! `cmp-3fa85f6457174562`.

use crate::errors::CoreError;

/// Prefix for submitted compound entries.
pub const PREFIX_COMPOUND: &str = "cmp";

const RANDOM_BYTES: usize = 8;

/// Generate a prefixed random ID.
///
/// # Errors
///
/// Returns [`CoreError::IdGeneration`] if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Generate a new compound ID.
///
/// # Errors
///
/// Returns [`CoreError::IdGeneration`] if the OS random source is unavailable.
pub fn new_compound_id() -> Result<String, CoreError> {
    generate_id(PREFIX_COMPOUND)
}
