//! Async driver for a [`Session`].
//!
//! The controller owns the session behind a lock and performs the I/O
//! between each `begin_*`/`finish_*` pair. The lock is never held across an
//! `.await`, so a structure change arriving while a prediction is in flight
//! is applied immediately and makes that prediction stale.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chem_core::entities::CompoundEntry;
use chem_core::enums::{Phase, StructureFormat};
use chem_core::responses::LeaderboardResponse;
use chem_core::traits::{
    ImageScanner, ImageUpload, LeaderboardStore, Predictor, StructureEditor,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::session::{PredictOutcome, ScanOutcome, Session};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub entry: CompoundEntry,
    /// Leaderboard after the submission, in insertion order. When the re-read
    /// failed this is the last snapshot that succeeded.
    pub leaderboard: Vec<CompoundEntry>,
    /// Whether `leaderboard` was re-read after the append.
    pub refreshed: bool,
}

pub struct Controller<E, P, S> {
    editor: E,
    predictor: P,
    store: S,
    session: Mutex<Session>,
    leaderboard: Mutex<Vec<CompoundEntry>>,
}

impl<E, P, S> Controller<E, P, S>
where
    E: StructureEditor,
    P: Predictor,
    S: LeaderboardStore,
{
    pub fn new(editor: E, predictor: P, store: S) -> Self {
        Self {
            editor,
            predictor,
            store,
            session: Mutex::new(Session::new()),
            leaderboard: Mutex::new(Vec::new()),
        }
    }

    pub const fn editor(&self) -> &E {
        &self.editor
    }

    pub const fn predictor(&self) -> &P {
        &self.predictor
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.lock_session().clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock_session().phase()
    }

    /// Last leaderboard snapshot, in insertion order.
    pub fn leaderboard(&self) -> Vec<CompoundEntry> {
        self.lock_leaderboard().clone()
    }

    /// Last leaderboard snapshot, ranked.
    pub fn standings(&self, limit: Option<usize>) -> LeaderboardResponse {
        LeaderboardResponse::from_entries(&self.lock_leaderboard(), limit)
    }

    /// Editor content changed.
    pub fn on_structure_changed(&self, notation: Option<&str>) -> Phase {
        let phase = self.lock_session().structure_changed(notation);
        debug!(%phase, "structure changed");
        phase
    }

    /// Wait for the editor, then pull its current structure into the session.
    pub async fn sync_from_editor(&self) -> Phase {
        self.editor.ready().await;
        let exported = self.editor.export_structure(StructureFormat::Mol).await;
        self.on_structure_changed(exported.as_deref())
    }

    /// Request a score for the current structure.
    ///
    /// # Errors
    ///
    /// `InvalidState` when no structure is drawn, `PredictionFailed` when the
    /// predictor fails. A result that arrives after the structure changed or
    /// after a newer request is discarded and reported as
    /// [`PredictOutcome::Superseded`].
    pub async fn on_predict_requested(&self) -> Result<PredictOutcome, WorkflowError> {
        let (ticket, structure) = self.lock_session().begin_prediction()?;
        debug!(len = structure.len(), "requesting prediction");

        let result = self
            .predictor
            .predict(&structure)
            .await
            .map_err(|e| e.to_string());

        let outcome = self.lock_session().finish_prediction(ticket, result);
        match &outcome {
            Ok(PredictOutcome::Scored(prediction)) => {
                debug!(ic50 = prediction.ic50, smiles = %prediction.smiles, "prediction applied");
            }
            Ok(PredictOutcome::Superseded) => warn!("prediction result is stale, discarded"),
            Err(error) => warn!(%error, "prediction failed"),
        }
        outcome
    }

    /// Persist the scored structure under `nickname`, re-read the leaderboard,
    /// and reset the session and canvas.
    ///
    /// A failed re-read does not fail the submission: the entry is already
    /// persisted, so the receipt carries the previous snapshot with
    /// `refreshed: false`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank nickname, `InvalidState` unless `Scored` or
    /// while another submission is in flight, `SubmissionFailed` when the
    /// store rejects the entry. State is unchanged on every error.
    pub async fn on_submit_requested(&self, nickname: &str) -> Result<SubmitReceipt, WorkflowError> {
        let ticket = self.lock_session().begin_submission(nickname, Utc::now())?;
        let entry = ticket.entry().clone();
        debug!(id = %entry.id, nickname = %entry.nickname, ic50 = entry.ic50, "submitting");

        let appended = self.store.append(&entry).await.map_err(|e| e.to_string());
        let submitted = self.lock_session().finish_submission(ticket, appended);
        let submitted = match submitted {
            Ok(submitted) => submitted,
            Err(error) => {
                warn!(%error, "submission failed");
                return Err(error);
            }
        };

        let (leaderboard, refreshed) = match self.refresh_leaderboard().await {
            Ok(entries) => (entries, true),
            Err(error) => {
                warn!(%error, "submitted, but the leaderboard could not be re-read");
                (self.leaderboard(), false)
            }
        };

        if submitted.reset {
            self.editor.clear().await;
        } else {
            debug!("structure changed during submission, canvas kept");
        }

        Ok(SubmitReceipt {
            entry: submitted.entry,
            leaderboard,
            refreshed,
        })
    }

    /// Re-read the full leaderboard from the store and keep it as the
    /// current snapshot.
    ///
    /// # Errors
    ///
    /// `LeaderboardUnavailable` when the store cannot be read. The previous
    /// snapshot is kept.
    pub async fn refresh_leaderboard(&self) -> Result<Vec<CompoundEntry>, WorkflowError> {
        let entries = self
            .store
            .list_all()
            .await
            .map_err(|e| WorkflowError::LeaderboardUnavailable(e.to_string()))?;
        debug!(count = entries.len(), "leaderboard refreshed");
        self.lock_leaderboard().clone_from(&entries);
        Ok(entries)
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_leaderboard(&self) -> MutexGuard<'_, Vec<CompoundEntry>> {
        self.leaderboard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E, P, S> Controller<E, P, S>
where
    E: StructureEditor,
    P: Predictor + ImageScanner,
    S: LeaderboardStore,
{
    /// Recognize a structure from an image and load it into the editor.
    ///
    /// The scan supersedes any pending prediction. When the backend also
    /// scored the structure the session lands in `Scored`.
    ///
    /// # Errors
    ///
    /// `PredictionFailed` when recognition fails, and also when the structure
    /// was recognized but not scored. In the latter case the recognized
    /// structure is still imported and the session is `Drafted`.
    pub async fn on_image_scanned(&self, image: ImageUpload) -> Result<ScanOutcome, WorkflowError> {
        let ticket = self.lock_session().begin_scan();
        debug!(file = %image.file_name, bytes = image.bytes.len(), "scanning image");

        let result = self
            .predictor
            .scan_image(image)
            .await
            .map_err(|e| e.to_string());

        let outcome = self.lock_session().finish_scan(ticket, result);
        let smiles = match &outcome {
            Ok(ScanOutcome::Scored(prediction)) => prediction.smiles.clone(),
            Ok(ScanOutcome::Recognized(scan)) => scan.smiles.clone(),
            Ok(ScanOutcome::Superseded) => {
                warn!("scan result is stale, discarded");
                return outcome;
            }
            Err(error) => {
                warn!(%error, "image scan failed");
                return outcome;
            }
        };

        if let Err(error) = self
            .editor
            .import_structure(&smiles, StructureFormat::Smiles)
            .await
        {
            warn!(%error, "could not load scanned structure into the editor");
        }

        match outcome {
            Ok(ScanOutcome::Recognized(scan)) => Err(WorkflowError::PredictionFailed(format!(
                "recognized '{}' but no score was returned",
                scan.smiles
            ))),
            other => other,
        }
    }
}
