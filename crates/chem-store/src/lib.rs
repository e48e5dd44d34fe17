//! # chem-store
//!
//! Append-only leaderboard persisted as JSON Lines.
//!
//! Each submitted [`CompoundEntry`] is one line in the file, so the file order
//! is the submission order that ranking relies on for tie-breaking. Lines are
//! only ever appended; nothing is rewritten.

mod error;

pub use error::StoreError;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chem_core::entities::{CompoundEntry, validate_ic50, validate_nickname};
use chem_core::errors::CoreError;
use chem_core::traits::LeaderboardStore;

/// Leaderboard backed by a local `.jsonl` file.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    // Serializes check-then-append within this process.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Point a store at `path`. Nothing is created until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The JSONL file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and append one entry, creating the file and its parent
    /// directories if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for a blank nickname/notation or bad
    /// score, [`StoreError::DuplicateId`] if the ID is already stored, or
    /// [`StoreError::Io`] if the file cannot be read or written.
    pub fn append_entry(&self, entry: &CompoundEntry) -> Result<(), StoreError> {
        validate_entry(entry)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.read_entries()?.iter().any(|e| e.id == entry.id) {
            return Err(StoreError::DuplicateId(entry.id.clone()));
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        serde_jsonlines::append_json_lines(&self.path, [entry])?;
        tracing::debug!(path = %self.path.display(), id = %entry.id, "appended leaderboard entry");
        Ok(())
    }

    /// Every stored entry in append order. A missing file is an empty
    /// leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read or a line does
    /// not parse.
    pub fn read_entries(&self) -> Result<Vec<CompoundEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let entries: Vec<CompoundEntry> =
            serde_jsonlines::json_lines(&self.path)?.collect::<std::io::Result<_>>()?;
        Ok(entries)
    }
}

fn validate_entry(entry: &CompoundEntry) -> Result<(), CoreError> {
    validate_nickname(&entry.nickname)?;
    if entry.smiles.trim().is_empty() {
        return Err(CoreError::EmptyNotation);
    }
    validate_ic50(entry.ic50)?;
    Ok(())
}

impl LeaderboardStore for JsonlStore {
    type Error = StoreError;

    async fn append(&self, entry: &CompoundEntry) -> Result<(), StoreError> {
        self.append_entry(entry)
    }

    async fn list_all(&self) -> Result<Vec<CompoundEntry>, StoreError> {
        self.read_entries()
    }
}
