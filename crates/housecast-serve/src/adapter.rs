//! The prediction adapter: owns the model and turns payload rows into
//! predictions.

use std::path::Path;
use std::sync::Arc;

use housecast_core::errors::{HousecastErrorCode, PredictionError};

use crate::batch::{FeatureBatch, Record};
use crate::model::{FeatureSchema, LinearModel, Regressor};

enum ModelState {
    Loaded(Arc<dyn Regressor>),
    /// Load failed at startup; every request reports this reason.
    Unavailable(String),
}

/// Scores batches with a model loaded once and shared read-only.
pub struct PredictionAdapter {
    state: ModelState,
}

impl std::fmt::Debug for PredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionAdapter")
            .field("model_loaded", &self.is_loaded())
            .finish()
    }
}

impl PredictionAdapter {
    /// Use an already constructed model.
    pub fn with_model(model: Arc<dyn Regressor>) -> Self {
        Self {
            state: ModelState::Loaded(model),
        }
    }

    /// Load a [`LinearModel`] artifact from `path`.
    ///
    /// A failure does not abort: the adapter is returned in an unavailable
    /// state and every prediction fails with `ModelUnavailable`.
    pub fn load(path: &Path) -> Self {
        match LinearModel::load(path) {
            Ok(model) => {
                tracing::info!(
                    path = %path.display(),
                    features = model.schema().len(),
                    "model loaded"
                );
                Self::with_model(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e.coded_string(),
                    "model failed to load; predictions will be unavailable"
                );
                Self::unavailable(e.to_string())
            }
        }
    }

    /// An adapter without a model.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    fn model(&self) -> Result<&dyn Regressor, PredictionError> {
        match &self.state {
            ModelState::Loaded(model) => Ok(model.as_ref()),
            ModelState::Unavailable(reason) => Err(PredictionError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    /// Features the loaded model requires.
    pub fn schema(&self) -> Result<&[FeatureSchema], PredictionError> {
        Ok(self.model()?.schema())
    }

    /// One prediction per row, in row order. All rows succeed or the call
    /// fails.
    pub fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>, PredictionError> {
        if batch.is_empty() {
            return Err(PredictionError::NoInput);
        }
        let model = self.model()?;
        let predictions = model.predict(batch)?;
        if predictions.len() != batch.len() {
            return Err(PredictionError::Inference(format!(
                "model returned {} predictions for {} rows",
                predictions.len(),
                batch.len()
            )));
        }
        Ok(predictions)
    }

    /// Validate raw payload rows against the model schema, then predict.
    pub fn predict_records(&self, records: &[Record]) -> Result<Vec<f64>, PredictionError> {
        let batch = FeatureBatch::from_records(records, self.schema()?)?;
        self.predict(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::records_from_value;
    use crate::model::FeatureKind;
    use serde_json::json;

    /// Predicts the row index, or a fixed number of values.
    struct StubModel {
        schema: Vec<FeatureSchema>,
        truncate: bool,
    }

    impl Regressor for StubModel {
        fn schema(&self) -> &[FeatureSchema] {
            &self.schema
        }

        fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>, PredictionError> {
            let n = if self.truncate { 1 } else { batch.len() };
            Ok((0..n).map(|i| i as f64).collect())
        }
    }

    fn stub(truncate: bool) -> PredictionAdapter {
        PredictionAdapter::with_model(Arc::new(StubModel {
            schema: vec![FeatureSchema::new("OverallQual", FeatureKind::Numeric)],
            truncate,
        }))
    }

    #[test]
    fn test_predictions_preserve_row_order() {
        let records = records_from_value(json!([
            { "OverallQual": 7 }, { "OverallQual": 5 }, { "OverallQual": 9 }
        ]))
        .unwrap();
        assert_eq!(stub(false).predict_records(&records).unwrap(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_short_model_output_is_inference_error() {
        let records = records_from_value(json!([{ "OverallQual": 7 }, { "OverallQual": 5 }])).unwrap();
        assert!(matches!(
            stub(true).predict_records(&records),
            Err(PredictionError::Inference(_))
        ));
    }

    #[test]
    fn test_unavailable_model_reported_per_request() {
        let adapter = PredictionAdapter::unavailable("artifact missing");
        assert!(!adapter.is_loaded());
        let records = records_from_value(json!([{ "OverallQual": 7 }])).unwrap();
        assert!(matches!(
            adapter.predict_records(&records),
            Err(PredictionError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = PredictionAdapter::load(&dir.path().join("absent.json"));
        assert!(!adapter.is_loaded());
    }

    #[test]
    fn test_load_valid_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"intercept": 1.5, "features": [{"kind": "numeric", "name": "OverallQual", "coefficient": 2.0}]}"#,
        )
        .unwrap();
        let adapter = PredictionAdapter::load(&path);
        assert!(adapter.is_loaded());
        let records = records_from_value(json!([{ "OverallQual": 3 }])).unwrap();
        assert_eq!(adapter.predict_records(&records).unwrap(), vec![7.5]);
    }
}
