//! Mapping of prediction errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use housecast_core::errors::{HousecastErrorCode, PredictionError};

/// A failed request. Client errors are `400`; everything else is `500`.
#[derive(Debug)]
pub struct ApiError(pub PredictionError);

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PredictionError::NoInput | PredictionError::Validation { .. } => StatusCode::BAD_REQUEST,
            PredictionError::ModelUnavailable { .. } | PredictionError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            PredictionError::NoInput => {
                tracing::warn!("no input data provided");
                json!({ "error": "No input data provided" })
            }
            PredictionError::Validation { message } => {
                tracing::error!(code = self.0.error_code(), %message, "value error during prediction");
                json!({ "error": "Value Error", "message": message })
            }
            other => {
                tracing::error!(code = other.error_code(), error = %other, "prediction failed");
                json!({ "error": "Internal Server Error", "message": other.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
