//! Regression models behind the prediction adapter.

pub mod linear;

pub use linear::{LinearModel, ModelArtifact, ModelFeature, TargetTransform};

use serde::{Deserialize, Serialize};

use housecast_core::errors::PredictionError;

use crate::batch::FeatureBatch;

/// How a feature's JSON value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// JSON numbers only.
    Numeric,
    /// Strings, numbers, or booleans, compared as strings.
    Categorical,
}

/// A feature column the model requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    pub name: String,
    pub kind: FeatureKind,
}

impl FeatureSchema {
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A loaded model that scores validated feature batches.
///
/// Implementations are shared across request tasks and must not mutate state
/// during `predict`.
pub trait Regressor: Send + Sync {
    /// Features the model reads, in the order batches are laid out.
    fn schema(&self) -> &[FeatureSchema];

    /// One prediction per batch row, in row order.
    fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>, PredictionError>;
}
