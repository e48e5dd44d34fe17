//! # chem-core
//!
//! Core types, ranking, ID generation, and collaborator traits for CyberChem Lab.
//!
//! This crate has no I/O and no async runtime. It provides:
//! - The [`CompoundEntry`](entities::CompoundEntry) record and prediction results
//! - Workflow phase, medal, and structure format enums
//! - Compound ID generation
//! - Leaderboard ranking (stable, ascending by IC50)
//! - Traits for the external collaborators (drawing editor, predictor, store)
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod leaderboard;
pub mod responses;
pub mod traits;
