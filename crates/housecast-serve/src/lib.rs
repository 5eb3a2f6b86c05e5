//! Housecast prediction service.
//!
//! - `model`: the `Regressor` seam and the JSON linear model
//! - `batch`: request payload parsing and validation against a model schema
//! - `adapter`: the prediction adapter owning the loaded model
//! - `http`: axum router, handlers, and error mapping
//! - `server`: binding and graceful shutdown

pub mod adapter;
pub mod batch;
pub mod http;
pub mod model;
pub mod server;

pub use adapter::PredictionAdapter;
pub use batch::{FeatureBatch, FeatureValue};
pub use model::{FeatureKind, FeatureSchema, LinearModel, Regressor};
