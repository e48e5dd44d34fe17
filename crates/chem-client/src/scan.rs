//! `POST /image-to-smiles`: image upload → SMILES + optional IC50.

use chem_core::entities::ScanResult;
use chem_core::traits::{ImageScanner, ImageUpload};
use reqwest::multipart::{Form, Part};

use crate::{ClientError, LabClient, http::check_response, predict::PredictionBody};

impl LabClient {
    /// Recognize a structure in an image and predict its IC50.
    ///
    /// Recognition failure is an error; a failed prediction is not. When the
    /// backend recognizes the structure but cannot score it, the result has
    /// `ic50: None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or no `smiles` comes back.
    pub async fn image_to_smiles(&self, image: ImageUpload) -> Result<ScanResult, ClientError> {
        let url = self.endpoint("image-to-smiles");
        tracing::debug!(%url, file = %image.file_name, bytes = image.bytes.len(), "uploading image");

        let part = Part::bytes(image.bytes).file_name(image.file_name);
        let form = Form::new().part("image", part);
        let resp = self.http.post(&url).multipart(form).send().await?;
        let resp = check_response(resp).await?;

        let mut body: PredictionBody = resp.json().await?;
        let smiles = body.take_smiles()?;
        let ic50 = match body.score() {
            Ok(ic50) => Some(ic50),
            Err(error) => {
                tracing::warn!(%error, %smiles, "structure recognized but not scored");
                None
            }
        };
        Ok(ScanResult { smiles, ic50 })
    }
}

impl ImageScanner for LabClient {
    type Error = ClientError;

    async fn scan_image(&self, image: ImageUpload) -> Result<ScanResult, ClientError> {
        self.image_to_smiles(image).await
    }
}
