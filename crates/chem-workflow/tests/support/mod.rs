//! In-memory collaborators for driving a `Controller` in tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chem_core::entities::{CompoundEntry, Prediction, ScanResult};
use chem_core::enums::StructureFormat;
use chem_core::traits::{ImageScanner, ImageUpload, LeaderboardStore, Predictor, StructureEditor};
use tokio::sync::{oneshot, watch};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

pub struct FakeEditor {
    ready: watch::Receiver<bool>,
    canvas: Mutex<Option<String>>,
    imports: Mutex<Vec<(String, StructureFormat)>>,
    exports: AtomicUsize,
    clears: AtomicUsize,
}

impl FakeEditor {
    pub fn ready_now() -> Self {
        let (tx, rx) = watch::channel(true);
        drop(tx);
        Self::with_receiver(rx)
    }

    /// An editor that is not ready until `true` is sent on the returned
    /// sender.
    pub fn loading() -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self::with_receiver(rx), tx)
    }

    fn with_receiver(ready: watch::Receiver<bool>) -> Self {
        Self {
            ready,
            canvas: Mutex::new(None),
            imports: Mutex::new(Vec::new()),
            exports: AtomicUsize::new(0),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn draw(&self, structure: &str) {
        *self.canvas.lock().unwrap() = Some(structure.to_string());
    }

    pub fn canvas(&self) -> Option<String> {
        self.canvas.lock().unwrap().clone()
    }

    pub fn imports(&self) -> Vec<(String, StructureFormat)> {
        self.imports.lock().unwrap().clone()
    }

    pub fn exports(&self) -> usize {
        self.exports.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl StructureEditor for FakeEditor {
    type Error = FakeError;

    async fn ready(&self) {
        let mut ready = self.ready.clone();
        // A dropped sender after `true` was sent still counts as ready.
        let _ = ready.wait_for(|ready| *ready).await;
    }

    async fn export_structure(&self, _format: StructureFormat) -> Option<String> {
        self.exports.fetch_add(1, Ordering::SeqCst);
        self.canvas().filter(|s| !s.is_empty())
    }

    async fn import_structure(&self, data: &str, format: StructureFormat) -> Result<(), FakeError> {
        self.imports
            .lock()
            .unwrap()
            .push((data.to_string(), format));
        self.draw(data);
        Ok(())
    }

    async fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.canvas.lock().unwrap() = None;
    }
}

// ---------------------------------------------------------------------------
// Predictor / scanner
// ---------------------------------------------------------------------------

type Reply<T> = Result<T, String>;

/// Answers from a fixed table, unless a gate is queued: then the next call
/// waits for the gate's reply.
#[derive(Default)]
pub struct FakePredictor {
    table: HashMap<String, Prediction>,
    gates: Mutex<VecDeque<oneshot::Receiver<Reply<Prediction>>>>,
    scan: Mutex<Option<Reply<ScanResult>>>,
    calls: AtomicUsize,
}

impl FakePredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `structure` with `(canonical, ic50)`.
    pub fn with(mut self, structure: &str, canonical: &str, ic50: f64) -> Self {
        self.table.insert(
            structure.to_string(),
            Prediction {
                smiles: canonical.to_string(),
                ic50,
            },
        );
        self
    }

    pub fn with_scan(self, reply: Reply<ScanResult>) -> Self {
        *self.scan.lock().unwrap() = Some(reply);
        self
    }

    /// Hold the next `predict` call until the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<Reply<Prediction>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for FakePredictor {
    type Error = FakeError;

    async fn predict(&self, structure: &str) -> Result<Prediction, FakeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate
                .await
                .map_err(|_| FakeError("gate dropped".to_string()))?
                .map_err(FakeError);
        }
        self.table
            .get(structure)
            .cloned()
            .ok_or_else(|| FakeError(format!("model rejected '{structure}'")))
    }
}

impl ImageScanner for FakePredictor {
    type Error = FakeError;

    async fn scan_image(&self, _image: ImageUpload) -> Result<ScanResult, FakeError> {
        self.scan
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err("no image model".to_string()))
            .map_err(FakeError)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<CompoundEntry>>,
    fail_append: AtomicBool,
    fail_list: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: Vec<CompoundEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_append.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<CompoundEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl LeaderboardStore for MemoryStore {
    type Error = FakeError;

    async fn append(&self, entry: &CompoundEntry) -> Result<(), FakeError> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(FakeError("store offline".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CompoundEntry>, FakeError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(FakeError("store offline".to_string()));
        }
        Ok(self.entries())
    }
}
