//! A minimal column store for the capper and the EDA reports.

pub mod column;

pub use column::Column;

use housecast_core::errors::AnalysisError;
use rustc_hash::FxHashMap;

use crate::Result;

/// Named, equal-length columns in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: FxHashMap<String, Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count; later columns
    /// must match it. Replacing an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        let len = column.len();
        let first_or_replacing_only =
            self.names.is_empty() || (self.names.len() == 1 && self.columns.contains_key(&name));
        if !first_or_replacing_only && len != self.rows {
            return Err(AnalysisError::LengthMismatch {
                expected: self.rows,
                actual: len,
            });
        }
        if !self.columns.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.rows = len;
        self.columns.insert(name, column);
        Ok(())
    }

    /// Builder form of [`Table::insert`] for numeric columns.
    pub fn with_numeric(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert(name, Column::Numeric(values))?;
        Ok(self)
    }

    /// Builder form of [`Table::insert`] for categorical columns.
    pub fn with_categorical<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<S>>,
    ) -> Result<Self> {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        self.insert(name, Column::Categorical(values))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names
            .iter()
            .filter_map(|name| self.columns.get(name).map(|c| (name.as_str(), c)))
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| AnalysisError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Borrow a numeric column.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values),
            Column::Categorical(_) => Err(AnalysisError::ColumnTypeMismatch {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    /// Mutably borrow a numeric column.
    pub fn numeric_mut(&mut self, name: &str) -> Result<&mut Vec<f64>> {
        match self.columns.get_mut(name) {
            Some(Column::Numeric(values)) => Ok(values),
            Some(Column::Categorical(_)) => Err(AnalysisError::ColumnTypeMismatch {
                column: name.to_string(),
                expected: "numeric",
            }),
            None => Err(AnalysisError::ColumnNotFound {
                column: name.to_string(),
            }),
        }
    }

    /// Borrow a categorical column.
    pub fn categorical(&self, name: &str) -> Result<&[Option<String>]> {
        match self.column(name)? {
            Column::Categorical(values) => Ok(values),
            Column::Numeric(_) => Err(AnalysisError::ColumnTypeMismatch {
                column: name.to_string(),
                expected: "categorical",
            }),
        }
    }

    /// Categorical column with every entry present, as borrowed labels.
    pub fn complete_labels(&self, name: &str) -> Result<Vec<&str>> {
        let values = self.categorical(name)?;
        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing > 0 {
            return Err(AnalysisError::MissingValues {
                column: name.to_string(),
                count: missing,
            });
        }
        Ok(values.iter().flatten().map(String::as_str).collect())
    }

    /// Numeric column with no missing (`NaN`) entries.
    pub fn complete_numeric(&self, name: &str) -> Result<&[f64]> {
        let values = self.numeric(name)?;
        let missing = values.iter().filter(|v| v.is_nan()).count();
        if missing > 0 {
            return Err(AnalysisError::MissingValues {
                column: name.to_string(),
                count: missing,
            });
        }
        Ok(values)
    }
}
