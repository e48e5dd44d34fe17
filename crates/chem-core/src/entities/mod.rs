//! Entity structs for CyberChem Lab domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`; the JSON
//! shape is the wire contract with the leaderboard backend.

mod compound;
mod prediction;

pub use compound::{CompoundEntry, validate_ic50, validate_nickname};
pub use prediction::{Prediction, ScanResult};
