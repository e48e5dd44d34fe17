use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A successful structure → score prediction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Prediction {
    /// Canonical notation returned by the predictor.
    pub smiles: String,
    pub ic50: f64,
}

/// Result of recognizing a structure from an image.
///
/// Recognition can succeed while scoring fails, so `ic50` is optional.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScanResult {
    pub smiles: String,
    pub ic50: Option<f64>,
}

impl ScanResult {
    /// The scan as a full prediction, if a score came back.
    #[must_use]
    pub fn prediction(&self) -> Option<Prediction> {
        self.ic50.map(|ic50| Prediction {
            smiles: self.smiles.clone(),
            ic50,
        })
    }
}
