//! # chem-workflow
//!
//! The compound submission workflow: draw → predict → submit.
//!
//! [`Session`] holds the transient state (structure, score) and its pure
//! transitions. [`Controller`] drives a session against the editor,
//! predictor and leaderboard store collaborators defined in
//! [`chem_core::traits`].

pub mod controller;
pub mod error;
pub mod session;

pub use controller::{Controller, SubmitReceipt};
pub use error::WorkflowError;
pub use session::{PredictOutcome, PredictTicket, ScanOutcome, Session, SubmitTicket, Submitted};
