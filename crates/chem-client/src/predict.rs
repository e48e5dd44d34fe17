//! `POST /mol-to-smiles`: molfile → canonical SMILES + IC50.

use chem_core::entities::{Prediction, validate_ic50};
use chem_core::traits::Predictor;
use serde::{Deserialize, Serialize};

use crate::{ClientError, LabClient, http::check_response};

#[derive(Serialize)]
struct MolRequest<'a> {
    mol: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct PredictionBody {
    pub(crate) smiles: Option<String>,
    pub(crate) ic50: Option<serde_json::Value>,
    pub(crate) error: Option<String>,
}

impl PredictionBody {
    /// Non-empty `smiles`, or [`ClientError::Malformed`].
    pub(crate) fn take_smiles(&mut self) -> Result<String, ClientError> {
        if let Some(error) = self.error.take() {
            return Err(ClientError::Malformed(format!("backend reported: {error}")));
        }
        match self.smiles.take() {
            Some(smiles) if !smiles.trim().is_empty() => Ok(smiles),
            _ => Err(ClientError::Malformed("missing smiles".to_string())),
        }
    }

    /// `ic50` as a valid score. Rejects strings (the backend sends a failure
    /// marker there), negatives, and missing values.
    pub(crate) fn score(&self) -> Result<f64, ClientError> {
        let value = self
            .ic50
            .as_ref()
            .ok_or_else(|| ClientError::Malformed("missing ic50".to_string()))?;
        let ic50 = value
            .as_f64()
            .ok_or_else(|| ClientError::Malformed(format!("ic50 is not a number: {value}")))?;
        validate_ic50(ic50).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

impl LabClient {
    /// Convert a molfile block to canonical SMILES and predict its IC50.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the body lacks a usable `smiles`/`ic50`.
    pub async fn mol_to_smiles(&self, mol: &str) -> Result<Prediction, ClientError> {
        let url = self.endpoint("mol-to-smiles");
        tracing::debug!(%url, bytes = mol.len(), "requesting prediction");
        let resp = self.http.post(&url).json(&MolRequest { mol }).send().await?;
        let resp = check_response(resp).await?;

        let mut body: PredictionBody = resp.json().await?;
        let smiles = body.take_smiles()?;
        let ic50 = body.score()?;
        Ok(Prediction { smiles, ic50 })
    }
}

impl Predictor for LabClient {
    type Error = ClientError;

    async fn predict(&self, structure: &str) -> Result<Prediction, ClientError> {
        self.mol_to_smiles(structure).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> PredictionBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_numeric_score() {
        let mut b = body(r#"{"smiles":"CCO","ic50":0.23}"#);
        assert_eq!(b.take_smiles().unwrap(), "CCO");
        assert!((b.score().unwrap() - 0.23).abs() < f64::EPSILON);
    }

    #[test]
    fn string_score_is_malformed() {
        let b = body(r#"{"smiles":"CCO","ic50":"예측 실패"}"#);
        assert!(matches!(b.score(), Err(ClientError::Malformed(_))));
    }

    #[test]
    fn negative_score_is_malformed() {
        let b = body(r#"{"smiles":"CCO","ic50":-1.0}"#);
        assert!(matches!(b.score(), Err(ClientError::Malformed(_))));
    }

    #[test]
    fn error_field_wins_over_smiles() {
        let mut b = body(r#"{"smiles":"CCO","error":"boom"}"#);
        assert!(matches!(b.take_smiles(), Err(ClientError::Malformed(m)) if m.contains("boom")));
    }

    #[test]
    fn blank_smiles_is_malformed() {
        let mut b = body(r#"{"smiles":"  ","ic50":1.0}"#);
        assert!(b.take_smiles().is_err());
    }
}
