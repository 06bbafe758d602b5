//! Model types
//!
//! The closed set of classification models the prediction service exposes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of the backend model that handles a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelName {
    #[serde(rename = "mobilenet_v2")]
    MobilenetV2,
    #[default]
    Resnet50,
    Densenet169,
}

impl ModelName {
    /// Every model in the order the selector shows them
    pub const ALL: [ModelName; 3] = [
        ModelName::MobilenetV2,
        ModelName::Resnet50,
        ModelName::Densenet169,
    ];

    /// Wire identifier sent in the `model` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::MobilenetV2 => "mobilenet_v2",
            ModelName::Resnet50 => "resnet50",
            ModelName::Densenet169 => "densenet169",
        }
    }

    /// Human readable label for the selector
    pub fn label(&self) -> &'static str {
        match self {
            ModelName::MobilenetV2 => "MobileNet V2",
            ModelName::Resnet50 => "ResNet50",
            ModelName::Densenet169 => "DenseNet169",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for ModelName {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
