//! Statistical analysis errors.

use super::error_code::{self, HousecastErrorCode};

/// Errors raised by the statistics engine.
///
/// All of these are deterministic in their inputs; retrying without changing
/// the data cannot succeed.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No comparison variable given: pass either numeric values or ordinal codes")]
    MissingComparisonVariable,

    #[error("Both numeric values and ordinal codes were given: pass only one")]
    ConflictingComparisonVariables,

    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{test} requires at least {required} observations, got {actual}")]
    InsufficientData {
        test: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Zero variance in {context}: values cannot be standardized")]
    ZeroVariance { context: String },

    #[error("Empty input: {context}")]
    EmptyInput { context: String },

    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Column {column} is not {expected}")]
    ColumnTypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("Column {column} has {count} missing values")]
    MissingValues { column: String, count: usize },

    #[error("Unknown category {label:?} for ordinal variable {variable}")]
    UnknownCategory { variable: String, label: String },
}

impl AnalysisError {
    /// Shorthand for an `EmptyInput` error.
    pub fn empty(context: impl Into<String>) -> Self {
        Self::EmptyInput {
            context: context.into(),
        }
    }
}

impl HousecastErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_)
            | Self::MissingComparisonVariable
            | Self::ConflictingComparisonVariables
            | Self::LengthMismatch { .. } => error_code::INVALID_ARGUMENT,
            Self::InsufficientData { .. } | Self::ZeroVariance { .. } => {
                error_code::INSUFFICIENT_DATA
            }
            Self::EmptyInput { .. } => error_code::EMPTY_INPUT,
            Self::ColumnNotFound { .. } => error_code::COLUMN_NOT_FOUND,
            Self::ColumnTypeMismatch { .. }
            | Self::MissingValues { .. }
            | Self::UnknownCategory { .. } => error_code::INVALID_DATA,
        }
    }
}
