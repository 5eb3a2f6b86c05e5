//! Ordered category lists for ordinal variables.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use housecast_core::errors::AnalysisError;

use crate::Result;

/// Variable name → category labels, lowest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrdinalCategories {
    order: FxHashMap<String, Vec<String>>,
}

impl OrdinalCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the ordering of `variable`.
    pub fn insert<S: Into<String>>(
        &mut self,
        variable: impl Into<String>,
        labels: impl IntoIterator<Item = S>,
    ) {
        self.order
            .insert(variable.into(), labels.into_iter().map(Into::into).collect());
    }

    /// Builder form of [`OrdinalCategories::insert`].
    pub fn with<S: Into<String>>(
        mut self,
        variable: impl Into<String>,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insert(variable, labels);
        self
    }

    pub fn categories(&self, variable: &str) -> Option<&[String]> {
        self.order.get(variable).map(Vec::as_slice)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.order.contains_key(variable)
    }

    /// Map each label to its position in the variable's ordering.
    ///
    /// Labels outside the ordering are rejected with `UnknownCategory`.
    pub fn encode<S: AsRef<str>>(&self, variable: &str, labels: &[S]) -> Result<Vec<i64>> {
        let order = self.categories(variable).ok_or_else(|| {
            AnalysisError::InvalidArgument(format!(
                "no category ordering defined for {variable}"
            ))
        })?;
        let codes: FxHashMap<&str, i64> = order
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i as i64))
            .collect();

        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                codes
                    .get(label)
                    .copied()
                    .ok_or_else(|| AnalysisError::UnknownCategory {
                        variable: variable.to_string(),
                        label: label.to_string(),
                    })
            })
            .collect()
    }
}
