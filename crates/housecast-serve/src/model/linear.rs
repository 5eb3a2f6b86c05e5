//! Linear regression model stored as a JSON artifact.
//!
//! ```json
//! {
//!   "intercept": 12.02,
//!   "target_transform": "log1p",
//!   "features": [
//!     { "kind": "numeric", "name": "GrLivArea", "coefficient": 0.21, "center": 1515.0, "scale": 525.0 },
//!     { "kind": "categorical", "name": "MSZoning", "levels": { "RL": 0.04, "RM": -0.06 } }
//!   ]
//! }
//! ```
//!
//! Numeric terms contribute `coefficient * (x - center) / scale`. Categorical
//! terms contribute the coefficient of the observed level, or nothing for a
//! level the model has not seen.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use housecast_core::errors::{ModelError, PredictionError};

use super::{FeatureKind, FeatureSchema, Regressor};
use crate::batch::{FeatureBatch, FeatureValue};

/// Inverse transform applied to the linear predictor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTransform {
    #[default]
    Identity,
    /// The model was fit on `ln(1 + y)`; predictions are mapped back with
    /// `exp(x) - 1`.
    Log1p,
}

impl TargetTransform {
    fn invert(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Log1p => x.exp_m1(),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

/// One feature term as stored in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFeature {
    Numeric {
        name: String,
        coefficient: f64,
        #[serde(default)]
        center: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
    Categorical {
        name: String,
        levels: FxHashMap<String, f64>,
    },
}

impl ModelFeature {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } | Self::Categorical { name, .. } => name,
        }
    }

    fn kind(&self) -> FeatureKind {
        match self {
            Self::Numeric { .. } => FeatureKind::Numeric,
            Self::Categorical { .. } => FeatureKind::Categorical,
        }
    }

    fn contribution(&self, value: &FeatureValue) -> Result<f64, PredictionError> {
        match (self, value) {
            (
                Self::Numeric {
                    coefficient,
                    center,
                    scale,
                    ..
                },
                FeatureValue::Number(x),
            ) => Ok(coefficient * (x - center) / scale),
            (Self::Categorical { levels, .. }, FeatureValue::Category(level)) => {
                Ok(levels.get(level).copied().unwrap_or(0.0))
            }
            _ => Err(PredictionError::Inference(format!(
                "feature '{}' has a value of the wrong kind",
                self.name()
            ))),
        }
    }
}

/// Serialized form of a [`LinearModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub intercept: f64,
    pub features: Vec<ModelFeature>,
    #[serde(default)]
    pub target_transform: TargetTransform,
}

/// A validated linear model.
#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    features: Vec<ModelFeature>,
    target_transform: TargetTransform,
    schema: Vec<FeatureSchema>,
}

impl LinearModel {
    /// Validate an artifact: finite coefficients, non-zero scales, unique
    /// feature names.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if !artifact.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".to_string()));
        }

        let mut seen = FxHashSet::default();
        for feature in &artifact.features {
            let name = feature.name();
            if name.is_empty() {
                return Err(ModelError::Invalid("feature with an empty name".to_string()));
            }
            if !seen.insert(name) {
                return Err(ModelError::Invalid(format!("duplicate feature '{name}'")));
            }
            match feature {
                ModelFeature::Numeric {
                    coefficient,
                    center,
                    scale,
                    ..
                } => {
                    if !(coefficient.is_finite() && center.is_finite()) {
                        return Err(ModelError::Invalid(format!(
                            "feature '{name}' has a non-finite coefficient or center"
                        )));
                    }
                    if !scale.is_finite() || *scale == 0.0 {
                        return Err(ModelError::Invalid(format!(
                            "feature '{name}' has scale {scale}; expected a finite non-zero number"
                        )));
                    }
                }
                ModelFeature::Categorical { levels, .. } => {
                    if let Some((level, _)) = levels.iter().find(|(_, c)| !c.is_finite()) {
                        return Err(ModelError::Invalid(format!(
                            "feature '{name}' level '{level}' has a non-finite coefficient"
                        )));
                    }
                }
            }
        }

        let schema = artifact
            .features
            .iter()
            .map(|f| FeatureSchema::new(f.name(), f.kind()))
            .collect();

        Ok(Self {
            intercept: artifact.intercept,
            features: artifact.features,
            target_transform: artifact.target_transform,
            schema,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Self::parse(json, "<string>")
    }

    /// Read and validate the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: display.clone(),
            source,
        })?;
        Self::parse(&content, &display)
    }

    fn parse(json: &str, path: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|e| ModelError::Parse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Self::from_artifact(artifact)
    }

    pub fn target_transform(&self) -> TargetTransform {
        self.target_transform
    }
}

impl Regressor for LinearModel {
    fn schema(&self) -> &[FeatureSchema] {
        &self.schema
    }

    fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>, PredictionError> {
        if !batch.matches_schema(&self.schema) {
            return Err(PredictionError::Inference(
                "feature batch does not match the model schema".to_string(),
            ));
        }

        batch
            .rows()
            .iter()
            .enumerate()
            .map(|(row, values)| {
                let mut linear = self.intercept;
                for (feature, value) in self.features.iter().zip(values) {
                    linear += feature.contribution(value)?;
                }
                let prediction = self.target_transform.invert(linear);
                if prediction.is_finite() {
                    Ok(prediction)
                } else {
                    Err(PredictionError::Inference(format!(
                        "prediction for row {row} is not finite"
                    )))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ARTIFACT: &str = r#"{
        "intercept": 100.0,
        "features": [
            { "kind": "numeric", "name": "GrLivArea", "coefficient": 2.0, "center": 10.0, "scale": 5.0 },
            { "kind": "categorical", "name": "MSZoning", "levels": { "RL": 7.0, "RM": -3.0 } }
        ]
    }"#;

    fn batch(model: &LinearModel, rows: serde_json::Value) -> FeatureBatch {
        let records = crate::batch::records_from_value(rows).unwrap();
        FeatureBatch::from_records(&records, model.schema()).unwrap()
    }

    #[test]
    fn test_schema_follows_artifact_order() {
        let model = LinearModel::from_json_str(ARTIFACT).unwrap();
        assert_eq!(
            model.schema(),
            &[
                FeatureSchema::new("GrLivArea", FeatureKind::Numeric),
                FeatureSchema::new("MSZoning", FeatureKind::Categorical),
            ]
        );
        assert_eq!(model.target_transform(), TargetTransform::Identity);
    }

    #[test]
    fn test_predicts_linear_combination() {
        let model = LinearModel::from_json_str(ARTIFACT).unwrap();
        let b = batch(
            &model,
            json!([
                { "GrLivArea": 20.0, "MSZoning": "RL" },
                { "GrLivArea": 10, "MSZoning": "FV", "Extra": true }
            ]),
        );
        // 100 + 2 * (20 - 10) / 5 + 7 = 111; unknown level adds nothing
        assert_eq!(model.predict(&b).unwrap(), vec![111.0, 100.0]);
    }

    #[test]
    fn test_log1p_target_is_inverted() {
        let model = LinearModel::from_artifact(ModelArtifact {
            intercept: 2.0_f64.ln(),
            features: vec![],
            target_transform: TargetTransform::Log1p,
        })
        .unwrap();
        let b = batch(&model, json!([{}]));
        let p = model.predict(&b).unwrap();
        assert!((p[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let artifact = r#"{"intercept": 0, "features": [
            {"kind": "numeric", "name": "x", "coefficient": 1, "scale": 0}
        ]}"#;
        assert!(matches!(
            LinearModel::from_json_str(artifact),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let artifact = r#"{"intercept": 0, "features": [
            {"kind": "numeric", "name": "x", "coefficient": 1},
            {"kind": "categorical", "name": "x", "levels": {}}
        ]}"#;
        assert!(matches!(
            LinearModel::from_json_str(artifact),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn test_unparseable_artifact() {
        assert!(matches!(
            LinearModel::from_json_str("{\"intercept\": }"),
            Err(ModelError::Parse { .. })
        ));
    }

    #[test]
    fn test_overflowing_prediction_is_inference_error() {
        let model = LinearModel::from_artifact(ModelArtifact {
            intercept: 1000.0,
            features: vec![],
            target_transform: TargetTransform::Log1p,
        })
        .unwrap();
        let b = batch(&model, json!([{}]));
        assert!(matches!(
            model.predict(&b),
            Err(PredictionError::Inference(_))
        ));
    }
}
