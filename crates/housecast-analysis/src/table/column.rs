//! Column storage.

/// A single column of observations.
///
/// Numeric columns mark missing entries with `NaN`; categorical columns use `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Number of missing entries.
    pub fn missing_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_nan()).count(),
            Self::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Number of exact zeros; always 0 for categorical columns.
    pub fn zero_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|&&v| v == 0.0).count(),
            Self::Categorical(_) => 0,
        }
    }
}
