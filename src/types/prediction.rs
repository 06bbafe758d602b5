//! Prediction types
//!
//! Wire shape of a successful prediction and the tagged outcome the UI renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single classification returned by the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Name of the winning class
    pub predicted_class: String,
    /// Probability of the winning class, in `[0, 1]`
    pub confidence: f64,
    /// Full score batch as returned by the service, when it sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_predictions: Option<Vec<Vec<f64>>>,
    /// When the response was decoded (not part of the wire format)
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(predicted_class: impl Into<String>, confidence: f64) -> Self {
        Self {
            predicted_class: predicted_class.into(),
            confidence,
            raw_predictions: None,
            received_at: Utc::now(),
        }
    }

    /// Confidence rendered as a percentage, e.g. `87.00%`
    pub fn confidence_percent(&self) -> String {
        format_confidence(self.confidence)
    }

    /// Number of classes the model scored, if the raw scores were returned
    pub fn class_count(&self) -> Option<usize> {
        self.raw_predictions
            .as_ref()
            .and_then(|batch| batch.first())
            .map(|scores| scores.len())
    }

    /// Whether the confidence is a usable probability
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

/// Format a `[0, 1]` probability as a percentage with two decimals
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// State of the prediction panel
///
/// Result and error live in one value so they can never be shown together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionOutcome {
    #[default]
    Idle,
    Loading,
    Success(PredictionResult),
    Failure(String),
}

impl PredictionOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, PredictionOutcome::Loading)
    }
}
