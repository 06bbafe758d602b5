//! Prediction requester
//!
//! Sends the selected image and model to the prediction service and turns the
//! answer into a [`PredictionResult`] or a [`PredictError`].

pub mod client;
pub mod session;

pub use client::{HttpBackend, ServiceInfo};
pub use session::{PredictionSession, RequestTicket};

use crate::intake::SelectedFile;
use crate::types::model::ModelName;
use crate::types::prediction::PredictionResult;
use async_trait::async_trait;
use thiserror::Error;

/// Prediction failures; none are retried
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("Please upload an image file.")]
    NoFile,
    #[error("Error occurred during prediction: {detail}")]
    Http { status: u16, detail: String },
    #[error("Error occurred during prediction: {0}")]
    Network(String),
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Network(err.to_string())
    }
}

/// Something that can classify an image with a given model
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn predict(
        &self,
        file: &SelectedFile,
        model: ModelName,
    ) -> Result<PredictionResult, PredictError>;
}

/// Request a prediction for the current selection
///
/// Fails with [`PredictError::NoFile`] before touching the backend when
/// nothing is selected.
pub async fn request_prediction<B>(
    backend: &B,
    file: Option<&SelectedFile>,
    model: ModelName,
) -> Result<PredictionResult, PredictError>
where
    B: PredictionBackend + ?Sized,
{
    let file = file.ok_or(PredictError::NoFile)?;
    backend.predict(file, model).await
}
