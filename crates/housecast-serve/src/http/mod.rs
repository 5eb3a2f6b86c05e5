//! HTTP surface: `POST /predict` and `GET /health`.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::adapter::PredictionAdapter;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub adapter: Arc<PredictionAdapter>,
}

impl AppState {
    pub fn new(adapter: PredictionAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}

/// Build the service router with request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
