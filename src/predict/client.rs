//! HTTP client for the prediction service

use crate::intake::SelectedFile;
use crate::predict::{PredictError, PredictionBackend};
use crate::storage::settings::AppSettings;
use crate::types::model::ModelName;
use crate::types::prediction::PredictionResult;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Root endpoint payload describing what the service has loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub models_loaded: Vec<String>,
    #[serde(default)]
    pub classes_loaded: usize,
}

impl ServiceInfo {
    /// Whether the service reported `model` as loaded
    pub fn supports(&self, model: ModelName) -> bool {
        self.models_loaded.iter().any(|name| name == model.as_str())
    }

    /// Models from the fixed set the service did not load
    pub fn missing_models(&self) -> Vec<ModelName> {
        ModelName::ALL
            .into_iter()
            .filter(|model| !self.supports(*model))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// Prediction backend talking to the service over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, PredictError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            PredictError::Network(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, PredictError> {
        Self::new(settings.server_url.clone(), settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// Ask the service which models and how many classes it has loaded
    pub async fn service_info(&self) -> Result<ServiceInfo, PredictError> {
        let url = format!("{}/", self.base_url);
        tracing::debug!("Probing prediction service at {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl PredictionBackend for HttpBackend {
    async fn predict(
        &self,
        file: &SelectedFile,
        model: ModelName,
    ) -> Result<PredictionResult, PredictError> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::info!(
            "[{}] POST {} model={} image={} ({} bytes)",
            request_id,
            self.predict_url(),
            model,
            file.name(),
            file.len()
        );

        let image = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| PredictError::Network(format!("Invalid content type: {}", e)))?;
        let form = Form::new().text("model", model.as_str()).part("image", image);

        let response = self
            .client
            .post(self.predict_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("[{}] Request failed: {}", request_id, e);
                PredictError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        let outcome = decode_prediction(status, &body);

        match &outcome {
            Ok(result) => tracing::info!(
                "[{}] {} -> {} ({}) in {:?}",
                request_id,
                status,
                result.predicted_class,
                result.confidence_percent(),
                started.elapsed()
            ),
            Err(e) => tracing::error!("[{}] {} -> {}", request_id, status, e),
        }
        outcome
    }
}

/// Interpret a `/predict` response
pub fn decode_prediction(status: StatusCode, body: &[u8]) -> Result<PredictionResult, PredictError> {
    let result: PredictionResult = decode_response(status, body)?;
    if !result.has_valid_confidence() {
        return Err(PredictError::Network(format!(
            "Invalid response: confidence {} is outside [0, 1]",
            result.confidence
        )));
    }
    Ok(result)
}

/// Map a status and body onto a decoded value or a [`PredictError`]
///
/// Failure bodies contribute their `detail` field when they have one; the
/// status text is used otherwise.
pub fn decode_response<T>(status: StatusCode, body: &[u8]) -> Result<T, PredictError>
where
    T: for<'de> Deserialize<'de>,
{
    if !status.is_success() {
        return Err(PredictError::Http {
            status: status.as_u16(),
            detail: error_detail(body).unwrap_or_else(|| status_text(status)),
        });
    }

    serde_json::from_slice(body)
        .map_err(|e| PredictError::Network(format!("Invalid response: {}", e)))
}

fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Value::Null => None,
        Value::String(detail) => Some(detail),
        // FastAPI validation errors send a list of objects
        other => Some(other.to_string()),
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
