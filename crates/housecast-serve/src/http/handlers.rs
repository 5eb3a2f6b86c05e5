//! Route handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use housecast_core::errors::PredictionError;

use super::{ApiError, AppState};
use crate::batch::parse_records;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// `POST /predict`.
///
/// The body is read raw so that empty and malformed payloads map onto the
/// service's own error bodies. Scoring runs on the blocking pool.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let records = parse_records(&body)?;
    tracing::debug!(rows = records.len(), "prediction request parsed");

    let adapter = state.adapter.clone();
    let predictions = tokio::task::spawn_blocking(move || adapter.predict_records(&records))
        .await
        .map_err(|e| PredictionError::Inference(format!("prediction task failed: {e}")))??;

    tracing::info!(rows = predictions.len(), "prediction completed");
    Ok(Json(PredictResponse { predictions }))
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: state.adapter.is_loaded(),
    })
}
