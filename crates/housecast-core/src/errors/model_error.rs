//! Model artifact errors.

use super::error_code::{self, HousecastErrorCode};

/// Errors that can occur while loading a serialized model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid model: {0}")]
    Invalid(String),
}

impl HousecastErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_LOAD_ERROR
    }
}
