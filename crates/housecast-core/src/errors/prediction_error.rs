//! Prediction errors.

use super::error_code::{self, HousecastErrorCode};

/// Errors returned by the prediction adapter.
///
/// A batch either fully succeeds or fails with one of these; partial results
/// are never returned.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("No input data provided")]
    NoInput,

    #[error("{message}")]
    Validation { message: String },

    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictionError {
    /// Shorthand for a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl HousecastErrorCode for PredictionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoInput => error_code::NO_INPUT,
            Self::Validation { .. } => error_code::VALIDATION_ERROR,
            Self::ModelUnavailable { .. } => error_code::MODEL_UNAVAILABLE,
            Self::Inference(_) => error_code::INFERENCE_ERROR,
        }
    }
}
