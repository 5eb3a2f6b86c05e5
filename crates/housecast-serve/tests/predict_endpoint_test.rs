//! Tests for the `/predict` and `/health` handlers.

use std::sync::Arc;

use axum::body::{to_bytes, Bytes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use housecast_core::errors::PredictionError;
use housecast_serve::http::handlers::{health, predict};
use housecast_serve::http::{router, AppState};
use housecast_serve::{FeatureBatch, FeatureKind, FeatureSchema, PredictionAdapter, Regressor};

const ARTIFACT: &str = r#"{
    "intercept": 50000.0,
    "features": [
        { "kind": "numeric", "name": "OverallQual", "coefficient": 10000.0 },
        { "kind": "categorical", "name": "CentralAir", "levels": { "Y": 5000.0 } }
    ]
}"#;

fn loaded_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, ARTIFACT).unwrap();
    let adapter = PredictionAdapter::load(&path);
    assert!(adapter.is_loaded());
    (dir, AppState::new(adapter))
}

async fn call_predict(state: AppState, body: &str) -> (StatusCode, Value) {
    let response: Response = predict(State(state), Bytes::from(body.to_string()))
        .await
        .into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_predict_returns_one_value_per_row() {
    let (_dir, state) = loaded_state();
    let body = r#"[
        {"OverallQual": 7, "CentralAir": "Y", "LotArea": 8450},
        {"OverallQual": 5, "CentralAir": "N"}
    ]"#;
    let (status, json) = call_predict(state, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "predictions": [125000.0, 100000.0] }));
}

#[tokio::test]
async fn test_column_payload_accepted() {
    let (_dir, state) = loaded_state();
    let body = r#"{"OverallQual": [1, 2], "CentralAir": ["N", "N"]}"#;
    let (status, json) = call_predict(state, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predictions"], json!([60000.0, 70000.0]));
}

#[tokio::test]
async fn test_empty_payload_is_no_input() {
    for body in ["", "[]", "{}", "null"] {
        let (_dir, state) = loaded_state();
        let (status, json) = call_predict(state, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json, json!({ "error": "No input data provided" }));
    }
}

#[tokio::test]
async fn test_malformed_json_is_value_error() {
    let (_dir, state) = loaded_state();
    let (status, json) = call_predict(state, "[{\"OverallQual\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Value Error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Malformed JSON payload"));
}

#[tokio::test]
async fn test_missing_feature_is_value_error() {
    let (_dir, state) = loaded_state();
    let (status, json) = call_predict(state, r#"[{"OverallQual": 7}]"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Value Error");
    assert_eq!(
        json["message"],
        "row 0 is missing required feature(s): CentralAir"
    );
}

#[tokio::test]
async fn test_wrong_type_is_value_error() {
    let (_dir, state) = loaded_state();
    let (status, json) =
        call_predict(state, r#"[{"OverallQual": "high", "CentralAir": "Y"}]"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Value Error");
}

#[tokio::test]
async fn test_unavailable_model_is_internal_error() {
    let state = AppState::new(PredictionAdapter::unavailable("artifact missing"));
    let (status, json) = call_predict(state, r#"[{"OverallQual": 7}]"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal Server Error");
    assert_eq!(json["message"], "Model unavailable: artifact missing");
}

struct FailingModel {
    schema: Vec<FeatureSchema>,
}

impl Regressor for FailingModel {
    fn schema(&self) -> &[FeatureSchema] {
        &self.schema
    }

    fn predict(&self, _batch: &FeatureBatch) -> Result<Vec<f64>, PredictionError> {
        Err(PredictionError::Inference("solver diverged".to_string()))
    }
}

#[tokio::test]
async fn test_inference_failure_is_internal_error() {
    let model = FailingModel {
        schema: vec![FeatureSchema::new("OverallQual", FeatureKind::Numeric)],
    };
    let state = AppState::new(PredictionAdapter::with_model(Arc::new(model)));
    let (status, json) = call_predict(state, r#"[{"OverallQual": 7}]"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Inference failed: solver diverged");
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let (_dir, state) = loaded_state();
    let loaded = health(State(state)).await;
    assert_eq!(loaded.0.status, "ok");
    assert!(loaded.0.model_loaded);

    let missing = health(State(AppState::new(PredictionAdapter::unavailable("x")))).await;
    assert!(!missing.0.model_loaded);
}

#[tokio::test]
async fn test_router_builds_with_state() {
    let (_dir, state) = loaded_state();
    let _app = router(state);
}
