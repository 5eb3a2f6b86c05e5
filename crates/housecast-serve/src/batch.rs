//! Request payloads and feature batches.
//!
//! A payload is either a JSON array of flat objects (one per row) or an
//! object of equal-length arrays (one per column). It is validated against a
//! model's [`FeatureSchema`] into a [`FeatureBatch`] whose columns follow the
//! schema order; payload columns the model does not use are ignored.

use serde_json::{Map, Value};

use housecast_core::errors::PredictionError;

use crate::model::{FeatureKind, FeatureSchema};

/// One row of the request: feature name to raw JSON value.
pub type Record = Map<String, Value>;

/// A validated feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

/// Rows of typed feature values laid out in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBatch {
    columns: Vec<FeatureSchema>,
    rows: Vec<Vec<FeatureValue>>,
}

/// Parse a request body into rows.
///
/// Empty bodies and the falsy JSON values (`null`, `[]`, `{}`, `false`, `0`,
/// `""`) are `NoInput`; anything else that is not a row or column payload is
/// a `Validation` error.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, PredictionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PredictionError::NoInput);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictionError::validation(format!("Malformed JSON payload: {e}")))?;
    records_from_value(value)
}

/// Interpret an already parsed payload. See [`parse_records`].
pub fn records_from_value(value: Value) -> Result<Vec<Record>, PredictionError> {
    match value {
        Value::Null => Err(PredictionError::NoInput),
        Value::Bool(false) => Err(PredictionError::NoInput),
        Value::Number(n) if n.as_f64() == Some(0.0) => Err(PredictionError::NoInput),
        Value::String(s) if s.is_empty() => Err(PredictionError::NoInput),
        Value::Array(rows) if rows.is_empty() => Err(PredictionError::NoInput),
        Value::Object(columns) if columns.is_empty() => Err(PredictionError::NoInput),
        Value::Array(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| match row {
                Value::Object(record) => Ok(record),
                other => Err(PredictionError::validation(format!(
                    "row {i} must be a JSON object, got {}",
                    json_type(&other)
                ))),
            })
            .collect(),
        Value::Object(columns) => records_from_columns(columns),
        other => Err(PredictionError::validation(format!(
            "expected a JSON array of objects, got {}",
            json_type(&other)
        ))),
    }
}

/// Transpose `{"col": [v0, v1, ..], ..}` into rows.
fn records_from_columns(columns: Map<String, Value>) -> Result<Vec<Record>, PredictionError> {
    let mut rows: Option<Vec<Record>> = None;
    for (name, column) in columns {
        let Value::Array(values) = column else {
            return Err(PredictionError::validation(
                "column payloads must map every feature to an array of values",
            ));
        };
        let rows = rows.get_or_insert_with(|| vec![Record::new(); values.len()]);
        if rows.len() != values.len() {
            return Err(PredictionError::validation(format!(
                "column '{name}' has {} values, expected {}",
                values.len(),
                rows.len()
            )));
        }
        for (row, value) in rows.iter_mut().zip(values) {
            row.insert(name.clone(), value);
        }
    }
    match rows {
        Some(rows) if !rows.is_empty() => Ok(rows),
        _ => Err(PredictionError::NoInput),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FeatureBatch {
    /// Validate `records` against `schema`.
    pub fn from_records(records: &[Record], schema: &[FeatureSchema]) -> Result<Self, PredictionError> {
        if records.is_empty() {
            return Err(PredictionError::NoInput);
        }

        let rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let missing: Vec<&str> = schema
                    .iter()
                    .filter(|f| !record.contains_key(&f.name))
                    .map(|f| f.name.as_str())
                    .collect();
                if !missing.is_empty() {
                    return Err(PredictionError::validation(format!(
                        "row {i} is missing required feature(s): {}",
                        missing.join(", ")
                    )));
                }
                schema
                    .iter()
                    .map(|feature| typed_value(feature, &record[&feature.name], i))
                    .collect()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            columns: schema.to_vec(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[FeatureSchema] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FeatureValue>] {
        &self.rows
    }

    /// True when the batch was validated against exactly `schema`.
    pub fn matches_schema(&self, schema: &[FeatureSchema]) -> bool {
        self.columns == schema
    }
}

fn typed_value(feature: &FeatureSchema, value: &Value, row: usize) -> Result<FeatureValue, PredictionError> {
    let wrong_type = |expected: &str| {
        PredictionError::validation(format!(
            "feature '{}' in row {row} must be {expected}, got {}",
            feature.name,
            json_type(value)
        ))
    };
    match (feature.kind, value) {
        (FeatureKind::Numeric, Value::Number(n)) => n
            .as_f64()
            .map(FeatureValue::Number)
            .ok_or_else(|| wrong_type("a finite number")),
        (FeatureKind::Numeric, _) => Err(wrong_type("a number")),
        (FeatureKind::Categorical, Value::String(s)) => Ok(FeatureValue::Category(s.clone())),
        (FeatureKind::Categorical, Value::Number(n)) => Ok(FeatureValue::Category(n.to_string())),
        (FeatureKind::Categorical, Value::Bool(b)) => Ok(FeatureValue::Category(b.to_string())),
        (FeatureKind::Categorical, _) => Err(wrong_type("a string, number, or boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<FeatureSchema> {
        vec![
            FeatureSchema::new("LotArea", FeatureKind::Numeric),
            FeatureSchema::new("CentralAir", FeatureKind::Categorical),
        ]
    }

    #[test]
    fn test_no_input_payloads() {
        for body in ["", "   ", "null", "[]", "{}", "false", "0", "\"\""] {
            assert!(
                matches!(parse_records(body.as_bytes()), Err(PredictionError::NoInput)),
                "body {body:?}"
            );
        }
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        assert!(matches!(
            parse_records(b"[{\"LotArea\": }]"),
            Err(PredictionError::Validation { .. })
        ));
    }

    #[test]
    fn test_scalar_and_mixed_rows_rejected() {
        assert!(matches!(
            parse_records(b"42"),
            Err(PredictionError::Validation { .. })
        ));
        assert!(matches!(
            parse_records(b"[{\"a\": 1}, 3]"),
            Err(PredictionError::Validation { .. })
        ));
    }

    #[test]
    fn test_column_payload_is_transposed() {
        let records = parse_records(br#"{"LotArea": [1, 2], "CentralAir": ["Y", "N"]}"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["CentralAir"], json!("N"));
    }

    #[test]
    fn test_column_payload_needs_arrays_of_equal_length() {
        assert!(parse_records(br#"{"LotArea": 1}"#).is_err());
        assert!(parse_records(br#"{"LotArea": [1, 2], "CentralAir": ["Y"]}"#).is_err());
    }

    #[test]
    fn test_batch_follows_schema_order_and_ignores_extras() {
        let records = records_from_value(json!([
            { "CentralAir": 1, "LotArea": 8450, "Street": "Pave" },
            { "CentralAir": "N", "LotArea": 9600.5 }
        ]))
        .unwrap();
        let batch = FeatureBatch::from_records(&records, &schema()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.rows()[0],
            vec![FeatureValue::Number(8450.0), FeatureValue::Category("1".to_string())]
        );
        assert!(batch.matches_schema(&schema()));
    }

    #[test]
    fn test_missing_feature_named_in_error() {
        let records = records_from_value(json!([{ "LotArea": 1 }])).unwrap();
        let err = FeatureBatch::from_records(&records, &schema()).unwrap_err();
        assert_eq!(err.to_string(), "row 0 is missing required feature(s): CentralAir");
    }

    #[test]
    fn test_wrong_type_rejected() {
        let records = records_from_value(json!([{ "LotArea": "big", "CentralAir": "Y" }])).unwrap();
        let err = FeatureBatch::from_records(&records, &schema()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "feature 'LotArea' in row 0 must be a number, got a string"
        );

        let records = records_from_value(json!([{ "LotArea": 1, "CentralAir": null }])).unwrap();
        assert!(FeatureBatch::from_records(&records, &schema()).is_err());
    }
}
