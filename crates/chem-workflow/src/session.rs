//! Transient workflow state and its transitions.
//!
//! [`Session`] owns the current structure, the current score, and the
//! bookkeeping that keeps asynchronous results from landing on the wrong
//! structure. Every method is synchronous and deterministic; the
//! [`Controller`](crate::Controller) performs the I/O between a `begin_*`
//! call and its matching `finish_*` call.
//!
//! Two counters guard against interleaving:
//! - `revision` bumps whenever the structure is replaced. A result computed
//!   for an older revision is stale.
//! - `prediction_seq` bumps for every prediction or scan issued. Only the
//!   most recent request may apply its result, so a newer request
//!   supersedes an older one still in flight.

use chem_core::entities::{CompoundEntry, Prediction, ScanResult, validate_nickname};
use chem_core::enums::Phase;
use chem_core::errors::CoreError;
use chrono::{DateTime, Utc};

use crate::error::WorkflowError;

/// Proof that a prediction or scan was issued against a given revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictTicket {
    revision: u64,
    seq: u64,
}

/// A submission in flight, carrying the entry handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    revision: u64,
    entry: CompoundEntry,
}

impl SubmitTicket {
    #[must_use]
    pub const fn entry(&self) -> &CompoundEntry {
        &self.entry
    }
}

/// What happened to a prediction result.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// The score was stored; the session is now `Scored`.
    Scored(Prediction),
    /// The structure changed or a newer request was issued; the result was
    /// discarded.
    Superseded,
}

/// What happened to an image scan result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Recognized and scored; the session is now `Scored`.
    Scored(Prediction),
    /// Recognized but not scored; the session is now `Drafted` with the
    /// recognized structure.
    Recognized(ScanResult),
    /// Discarded in favor of newer state.
    Superseded,
}

/// A persisted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub entry: CompoundEntry,
    /// Whether the session was reset to `Empty`. False when the structure
    /// changed while the submission was in flight: the newer drawing is kept.
    pub reset: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    structure: Option<String>,
    score: Option<f64>,
    revision: u64,
    prediction_seq: u64,
    pending_prediction: Option<u64>,
    submitting: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        Phase::derive(self.structure.is_some(), self.score.is_some())
    }

    #[must_use]
    pub fn structure(&self) -> Option<&str> {
        self.structure.as_deref()
    }

    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        self.score
    }

    #[must_use]
    pub const fn is_predicting(&self) -> bool {
        self.pending_prediction.is_some()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replace the structure. Always clears the score, even when the new
    /// notation equals the old one. Blank or absent notation empties the
    /// session.
    pub fn structure_changed(&mut self, notation: Option<&str>) -> Phase {
        self.revision += 1;
        self.score = None;
        self.structure = notation
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string);
        self.phase()
    }

    /// Issue a prediction for the current structure.
    ///
    /// Returns the ticket and the notation to send.
    pub fn begin_prediction(&mut self) -> Result<(PredictTicket, String), WorkflowError> {
        let Some(structure) = self.structure.clone() else {
            return Err(WorkflowError::InvalidState {
                action: "predict",
                phase: self.phase(),
                reason: "no structure drawn",
            });
        };
        Ok((self.issue_ticket(), structure))
    }

    /// Apply (or discard) the result of a prediction.
    ///
    /// On success the notation is replaced by the canonical one returned and
    /// the session becomes `Scored`. On failure the pre-call state is kept.
    /// Stale results, successful or not, are discarded.
    pub fn finish_prediction(
        &mut self,
        ticket: PredictTicket,
        result: Result<Prediction, String>,
    ) -> Result<PredictOutcome, WorkflowError> {
        if !self.settle(ticket) {
            return Ok(PredictOutcome::Superseded);
        }
        let prediction = result.map_err(WorkflowError::PredictionFailed)?;
        self.structure = Some(prediction.smiles.clone());
        self.score = Some(prediction.ic50);
        Ok(PredictOutcome::Scored(prediction))
    }

    /// Issue an image scan. Allowed in any phase; a scan replaces whatever
    /// is drawn.
    pub fn begin_scan(&mut self) -> PredictTicket {
        self.issue_ticket()
    }

    /// Apply (or discard) the result of an image scan.
    ///
    /// A recognized structure replaces the current one. Without a score the
    /// session lands in `Drafted`.
    pub fn finish_scan(
        &mut self,
        ticket: PredictTicket,
        result: Result<ScanResult, String>,
    ) -> Result<ScanOutcome, WorkflowError> {
        if !self.settle(ticket) {
            return Ok(ScanOutcome::Superseded);
        }
        let scan = result.map_err(WorkflowError::PredictionFailed)?;
        if scan.smiles.trim().is_empty() {
            return Err(WorkflowError::PredictionFailed(
                "no structure recognized in image".to_string(),
            ));
        }
        self.structure_changed(Some(&scan.smiles));
        match scan.prediction() {
            Some(prediction) => {
                self.structure = Some(prediction.smiles.clone());
                self.score = Some(prediction.ic50);
                Ok(ScanOutcome::Scored(prediction))
            }
            None => Ok(ScanOutcome::Recognized(scan)),
        }
    }

    /// Build the entry to persist.
    ///
    /// The nickname is checked first: a blank nickname is `InvalidInput` in
    /// every phase. State is unchanged on any error.
    pub fn begin_submission(
        &mut self,
        nickname: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmitTicket, WorkflowError> {
        let nickname = validate_nickname(nickname)
            .map_err(|e| WorkflowError::InvalidInput(e.to_string()))?;
        if self.submitting {
            return Err(self.invalid_submit("a submission is already in flight"));
        }
        let (Some(structure), Some(score)) = (self.structure.as_deref(), self.score) else {
            return Err(self.invalid_submit("structure has not been scored"));
        };

        let entry = CompoundEntry::create(nickname, structure, score, now).map_err(|e| match e {
            CoreError::IdGeneration(_) => WorkflowError::SubmissionFailed(e.to_string()),
            other => WorkflowError::InvalidInput(other.to_string()),
        })?;
        self.submitting = true;
        Ok(SubmitTicket {
            revision: self.revision,
            entry,
        })
    }

    /// Settle a submission. Success resets to `Empty` unless the structure
    /// changed meanwhile; failure keeps the pre-call state.
    pub fn finish_submission(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(), String>,
    ) -> Result<Submitted, WorkflowError> {
        self.submitting = false;
        result.map_err(WorkflowError::SubmissionFailed)?;

        let reset = ticket.revision == self.revision;
        if reset {
            self.structure_changed(None);
        }
        Ok(Submitted {
            entry: ticket.entry,
            reset,
        })
    }

    fn issue_ticket(&mut self) -> PredictTicket {
        self.prediction_seq += 1;
        self.pending_prediction = Some(self.prediction_seq);
        PredictTicket {
            revision: self.revision,
            seq: self.prediction_seq,
        }
    }

    /// Clear the pending slot if `ticket` owns it. Returns whether the
    /// ticket's result may still be applied.
    fn settle(&mut self, ticket: PredictTicket) -> bool {
        if self.pending_prediction != Some(ticket.seq) {
            return false;
        }
        self.pending_prediction = None;
        ticket.revision == self.revision
    }

    fn invalid_submit(&self, reason: &'static str) -> WorkflowError {
        WorkflowError::InvalidState {
            action: "submit",
            phase: self.phase(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prediction(smiles: &str, ic50: f64) -> Prediction {
        Prediction {
            smiles: smiles.to_string(),
            ic50,
        }
    }

    fn scored(smiles: &str, ic50: f64) -> Session {
        let mut session = Session::new();
        session.structure_changed(Some(smiles));
        let (ticket, _) = session.begin_prediction().unwrap();
        session
            .finish_prediction(ticket, Ok(prediction(smiles, ic50)))
            .unwrap();
        session
    }

    #[test]
    fn new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.structure(), None);
        assert_eq!(session.score(), None);
    }

    #[test]
    fn structure_change_drafts_and_clears_score_from_any_phase() {
        for mut session in [Session::new(), scored("CCO", 0.5)] {
            assert_eq!(session.structure_changed(Some("CCN")), Phase::Drafted);
            assert_eq!(session.score(), None);
            assert_eq!(session.structure(), Some("CCN"));
        }
    }

    #[test]
    fn identical_structure_still_clears_score() {
        let mut session = scored("CCO", 0.5);
        session.structure_changed(Some("CCO"));
        assert_eq!(session.phase(), Phase::Drafted);
        assert_eq!(session.score(), None);
    }

    #[test]
    fn blank_structure_empties_session() {
        let mut session = scored("CCO", 0.5);
        assert_eq!(session.structure_changed(Some("  \n")), Phase::Empty);
        assert_eq!(session.score(), None);
        let mut session = scored("CCO", 0.5);
        assert_eq!(session.structure_changed(None), Phase::Empty);
    }

    #[test]
    fn predict_requires_structure() {
        let mut session = Session::new();
        let err = session.begin_prediction().unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidState {
                action: "predict",
                phase: Phase::Empty,
                ..
            }
        ));
        assert!(!session.is_predicting());
    }

    #[test]
    fn prediction_replaces_notation_with_canonical_form() {
        let mut session = Session::new();
        session.structure_changed(Some("molblock"));
        let (ticket, sent) = session.begin_prediction().unwrap();
        assert_eq!(sent, "molblock");
        let outcome = session
            .finish_prediction(ticket, Ok(prediction("CCO", 0.23)))
            .unwrap();
        assert_eq!(outcome, PredictOutcome::Scored(prediction("CCO", 0.23)));
        assert_eq!(session.phase(), Phase::Scored);
        assert_eq!(session.structure(), Some("CCO"));
        assert_eq!(session.score(), Some(0.23));
    }

    #[test]
    fn failed_prediction_keeps_drafted_state() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let before = session.clone();
        let (ticket, _) = session.begin_prediction().unwrap();
        let err = session
            .finish_prediction(ticket, Err("timeout".to_string()))
            .unwrap_err();
        assert_eq!(err, WorkflowError::PredictionFailed("timeout".to_string()));
        assert_eq!(session.phase(), Phase::Drafted);
        assert_eq!(session.structure(), before.structure());
        assert!(!session.is_predicting());
    }

    #[test]
    fn result_for_old_structure_is_discarded() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let (ticket, _) = session.begin_prediction().unwrap();
        session.structure_changed(Some("CCN"));
        let outcome = session
            .finish_prediction(ticket, Ok(prediction("CCO", 0.1)))
            .unwrap();
        assert_eq!(outcome, PredictOutcome::Superseded);
        assert_eq!(session.phase(), Phase::Drafted);
        assert_eq!(session.structure(), Some("CCN"));
    }

    #[test]
    fn stale_failure_is_also_discarded() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let (ticket, _) = session.begin_prediction().unwrap();
        session.structure_changed(Some("CCN"));
        let outcome = session.finish_prediction(ticket, Err("boom".to_string()));
        assert_eq!(outcome, Ok(PredictOutcome::Superseded));
    }

    #[test]
    fn newer_request_supersedes_older_in_any_resolution_order() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let (first, _) = session.begin_prediction().unwrap();
        let (second, _) = session.begin_prediction().unwrap();

        // Newer resolves first, then the older one arrives late.
        let applied = session
            .finish_prediction(second, Ok(prediction("CCO", 2.0)))
            .unwrap();
        assert_eq!(applied, PredictOutcome::Scored(prediction("CCO", 2.0)));
        let late = session
            .finish_prediction(first, Ok(prediction("CCO", 1.0)))
            .unwrap();
        assert_eq!(late, PredictOutcome::Superseded);
        assert_eq!(session.score(), Some(2.0));
    }

    #[test]
    fn older_resolving_first_does_not_apply() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let (first, _) = session.begin_prediction().unwrap();
        let (second, _) = session.begin_prediction().unwrap();

        let early = session
            .finish_prediction(first, Ok(prediction("CCO", 1.0)))
            .unwrap();
        assert_eq!(early, PredictOutcome::Superseded);
        assert!(session.is_predicting());
        session
            .finish_prediction(second, Ok(prediction("CCO", 2.0)))
            .unwrap();
        assert_eq!(session.score(), Some(2.0));
    }

    #[test]
    fn blank_nickname_is_invalid_input_and_changes_nothing() {
        for mut session in [Session::new(), scored("CCO", 0.23)] {
            let before = session.clone();
            let err = session.begin_submission(" \t ", Utc::now()).unwrap_err();
            assert!(matches!(err, WorkflowError::InvalidInput(_)));
            assert_eq!(session, before);
        }
    }

    #[test]
    fn submit_requires_scored_phase() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let err = session.begin_submission("ChemWhiz", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidState {
                action: "submit",
                phase: Phase::Drafted,
                ..
            }
        ));
        assert!(!session.is_submitting());
    }

    #[test]
    fn structure_change_after_scoring_blocks_submission() {
        let mut session = scored("CCO", 0.23);
        session.structure_changed(Some("CCN"));
        let err = session.begin_submission("ChemWhiz", Utc::now()).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState { .. }));
    }

    #[test]
    fn second_submission_in_flight_is_rejected() {
        let mut session = scored("CCO", 0.23);
        let _ticket = session.begin_submission("ChemWhiz", Utc::now()).unwrap();
        let err = session.begin_submission("Again", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidState {
                reason: "a submission is already in flight",
                ..
            }
        ));
    }

    #[test]
    fn successful_submission_resets_to_empty() {
        let mut session = scored("CCO", 0.23);
        let ticket = session.begin_submission("  ChemWhiz ", Utc::now()).unwrap();
        assert_eq!(ticket.entry().nickname, "ChemWhiz");
        assert_eq!(ticket.entry().smiles, "CCO");
        assert_eq!(ticket.entry().ic50, 0.23);

        let submitted = session.finish_submission(ticket, Ok(())).unwrap();
        assert!(submitted.reset);
        assert_eq!(session.phase(), Phase::Empty);
        assert!(!session.is_submitting());
    }

    #[test]
    fn failed_submission_keeps_scored_state() {
        let mut session = scored("CCO", 0.23);
        let ticket = session.begin_submission("ChemWhiz", Utc::now()).unwrap();
        let err = session
            .finish_submission(ticket, Err("disk full".to_string()))
            .unwrap_err();
        assert_eq!(err, WorkflowError::SubmissionFailed("disk full".to_string()));
        assert_eq!(session.phase(), Phase::Scored);
        assert!(!session.is_submitting());
    }

    #[test]
    fn submission_keeps_drawing_made_while_in_flight() {
        let mut session = scored("CCO", 0.23);
        let ticket = session.begin_submission("ChemWhiz", Utc::now()).unwrap();
        session.structure_changed(Some("CCN"));
        let submitted = session.finish_submission(ticket, Ok(())).unwrap();
        assert!(!submitted.reset);
        assert_eq!(session.structure(), Some("CCN"));
        assert_eq!(session.phase(), Phase::Drafted);
    }

    #[test]
    fn scan_with_score_lands_in_scored() {
        let mut session = Session::new();
        let ticket = session.begin_scan();
        let outcome = session
            .finish_scan(
                ticket,
                Ok(ScanResult {
                    smiles: "c1ccccc1".to_string(),
                    ic50: Some(4.2),
                }),
            )
            .unwrap();
        assert_eq!(outcome, ScanOutcome::Scored(prediction("c1ccccc1", 4.2)));
        assert_eq!(session.phase(), Phase::Scored);
    }

    #[test]
    fn scan_without_score_lands_in_drafted() {
        let mut session = scored("CCO", 0.23);
        let ticket = session.begin_scan();
        let outcome = session
            .finish_scan(
                ticket,
                Ok(ScanResult {
                    smiles: "c1ccccc1".to_string(),
                    ic50: None,
                }),
            )
            .unwrap();
        assert!(matches!(outcome, ScanOutcome::Recognized(_)));
        assert_eq!(session.phase(), Phase::Drafted);
        assert_eq!(session.structure(), Some("c1ccccc1"));
        assert_eq!(session.score(), None);
    }

    #[test]
    fn scan_supersedes_pending_prediction() {
        let mut session = Session::new();
        session.structure_changed(Some("CCO"));
        let (prediction_ticket, _) = session.begin_prediction().unwrap();
        let scan_ticket = session.begin_scan();
        session
            .finish_scan(
                scan_ticket,
                Ok(ScanResult {
                    smiles: "CCN".to_string(),
                    ic50: Some(3.0),
                }),
            )
            .unwrap();
        let late = session
            .finish_prediction(prediction_ticket, Ok(prediction("CCO", 0.1)))
            .unwrap();
        assert_eq!(late, PredictOutcome::Superseded);
        assert_eq!(session.structure(), Some("CCN"));
        assert_eq!(session.score(), Some(3.0));
    }
}
