//! Contracts for the external collaborators the workflow drives.
//!
//! The drawing editor, the prediction service, and leaderboard persistence
//! are all outside this workspace's core. Each is a trait so the workflow can
//! be exercised against in-memory fakes, the HTTP backend, or a local file.
//!
//! Methods return `impl Future + Send` so implementors can use `async fn`
//! while the workflow stays usable from multi-threaded runtimes.

use std::future::Future;

use crate::entities::{CompoundEntry, Prediction, ScanResult};
use crate::enums::StructureFormat;

/// The molecule drawing canvas.
///
/// Export failures are not errors: an absent or empty export simply means
/// there is no structure.
pub trait StructureEditor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolves once the editor can service export/import calls.
    fn ready(&self) -> impl Future<Output = ()> + Send;

    /// Current structure in `format`, or `None` when nothing is drawn.
    fn export_structure(
        &self,
        format: StructureFormat,
    ) -> impl Future<Output = Option<String>> + Send;

    /// Replace the canvas contents.
    fn import_structure(
        &self,
        data: &str,
        format: StructureFormat,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Wipe the canvas.
    fn clear(&self) -> impl Future<Output = ()> + Send;
}

/// Structure → (canonical notation, IC50).
pub trait Predictor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn predict(
        &self,
        structure: &str,
    ) -> impl Future<Output = Result<Prediction, Self::Error>> + Send;
}

/// An image to recognize a structure from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Image → (notation, optional IC50).
pub trait ImageScanner: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn scan_image(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<ScanResult, Self::Error>> + Send;
}

/// Append-only leaderboard persistence.
pub trait LeaderboardStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn append(&self, entry: &CompoundEntry) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Every entry ever appended, in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<CompoundEntry>, Self::Error>> + Send;
}
