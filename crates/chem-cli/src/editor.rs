//! A structure file on disk standing in for the drawing canvas.
//!
//! The file extension fixes the canvas format: `.smi` and `.smiles` hold a
//! SMILES line, anything else is a MOL block.

use std::io;
use std::path::{Path, PathBuf};

use chem_core::enums::StructureFormat;
use chem_core::traits::StructureEditor;
use tracing::{debug, warn};

/// Terminator line of a MOL block (V2000 and V3000 alike).
const MOL_END: &str = "M  END";

/// Canvas format implied by a file's extension.
#[must_use]
pub fn canvas_format(path: &Path) -> StructureFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("smi") || ext.eq_ignore_ascii_case("smiles") => {
            StructureFormat::Smiles
        }
        _ => StructureFormat::Mol,
    }
}

fn is_mol_block(contents: &str) -> bool {
    contents.lines().any(|line| line.trim_end() == MOL_END)
}

/// File-backed [`StructureEditor`].
///
/// Export reads the whole file; a missing or blank file means nothing is
/// drawn. Only the canvas format can be exported or imported: asking a MOL
/// canvas for SMILES (or the reverse) exports nothing and refuses the
/// import. Clearing only truncates the file when the editor was opened with
/// clearing enabled, so a plain `predict` never destroys the user's drawing.
#[derive(Debug, Clone)]
pub struct MolFileEditor {
    path: Option<PathBuf>,
    format: StructureFormat,
    clear_on_reset: bool,
}

impl MolFileEditor {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            format: canvas_format(&path),
            path: Some(path),
            clear_on_reset: false,
        }
    }

    /// An editor with no backing file: exports nothing, imports are dropped.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            path: None,
            format: StructureFormat::Mol,
            clear_on_reset: false,
        }
    }

    #[must_use]
    pub const fn clear_on_reset(mut self, enabled: bool) -> Self {
        self.clear_on_reset = enabled;
        self
    }

    #[must_use]
    pub const fn format(&self) -> StructureFormat {
        self.format
    }
}

impl StructureEditor for MolFileEditor {
    type Error = io::Error;

    async fn ready(&self) {}

    async fn export_structure(&self, format: StructureFormat) -> Option<String> {
        let path = self.path.as_ref()?;
        if format != self.format {
            debug!(path = %path.display(), requested = %format, canvas = %self.format, "format not available");
            return None;
        }
        match tokio::fs::read_to_string(path).await {
            Ok(contents) if contents.trim().is_empty() => None,
            Ok(contents) if self.format == StructureFormat::Mol && !is_mol_block(&contents) => {
                warn!(path = %path.display(), "file is not a MOL block, missing its end line");
                None
            }
            Ok(contents) => {
                debug!(path = %path.display(), %format, "exported structure");
                Some(contents)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                warn!(path = %path.display(), %error, "could not read structure file");
                None
            }
        }
    }

    async fn import_structure(&self, data: &str, format: StructureFormat) -> Result<(), io::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if format != self.format {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "cannot write {format} into {} ({} canvas)",
                    path.display(),
                    self.format
                ),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        debug!(path = %path.display(), %format, "imported structure");
        Ok(())
    }

    async fn clear(&self) {
        let Some(path) = self.path.as_ref().filter(|_| self.clear_on_reset) else {
            return;
        };
        if let Err(error) = tokio::fs::write(path, "").await {
            warn!(path = %path.display(), %error, "could not clear structure file");
        }
    }
}
