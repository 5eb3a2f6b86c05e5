//! Test selection.
//!
//! Numeric samples get a parametric test only when the whole sample and every
//! group pass the normality check; ordinal codes always get a rank test. Two
//! groups use the two-sample tests, more groups the k-sample ones.

use std::hash::Hash;

use housecast_core::config::AnalysisConfig;
use housecast_core::errors::AnalysisError;

use super::grouping::split_by_group;
use crate::descriptive::ensure_finite;
use crate::hypothesis::{
    kruskal_wallis, mann_whitney_u, one_way_anova, student_t_test, TestKind, TestOutcome,
    TestResult,
};
use crate::normality::NormalityChecker;
use crate::Result;

/// Minimum numeric sample for a comparison.
const MIN_NUMERIC_SAMPLE: usize = 3;

/// The variable compared across groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison<'a> {
    /// A continuous sample.
    Numeric(&'a [f64]),
    /// Integer codes of an ordinal variable.
    Ordinal(&'a [i64]),
}

impl Comparison<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Ordinal(codes) => codes.len(),
        }
    }
}

/// Test selector with a configurable normality checker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TestSelector {
    checker: NormalityChecker,
}

impl TestSelector {
    pub fn new(checker: NormalityChecker) -> Self {
        Self { checker }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(NormalityChecker::from_config(config))
    }

    pub fn checker(&self) -> &NormalityChecker {
        &self.checker
    }

    /// Choose and run the comparison test for `comparison` split by `grouping`.
    pub fn run<G: Eq + Hash>(&self, grouping: &[G], comparison: Comparison<'_>) -> Result<TestResult> {
        if grouping.len() != comparison.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: grouping.len(),
                actual: comparison.len(),
            });
        }

        let result = match comparison {
            Comparison::Numeric(values) => self.run_numeric(grouping, values)?,
            Comparison::Ordinal(codes) => run_ordinal(grouping, codes)?,
        };

        match result.test {
            Some(kind) => tracing::debug!(
                test = %kind,
                rank_based = kind.is_rank_based(),
                p_value = result.p_value,
                "comparison test selected"
            ),
            None => tracing::debug!("degenerate input, no comparison test run"),
        }
        Ok(result)
    }

    /// Option-based entry point: exactly one of `numeric` and
    /// `ordinal_codes` must be given.
    pub fn select_and_run<G: Eq + Hash>(
        &self,
        grouping: &[G],
        numeric: Option<&[f64]>,
        ordinal_codes: Option<&[i64]>,
    ) -> Result<TestResult> {
        let comparison = match (numeric, ordinal_codes) {
            (Some(values), None) => Comparison::Numeric(values),
            (None, Some(codes)) => Comparison::Ordinal(codes),
            (None, None) => return Err(AnalysisError::MissingComparisonVariable),
            (Some(_), Some(_)) => return Err(AnalysisError::ConflictingComparisonVariables),
        };
        self.run(grouping, comparison)
    }

    fn run_numeric<G: Eq + Hash>(&self, grouping: &[G], values: &[f64]) -> Result<TestResult> {
        let groups = split_by_group(grouping, values)?;
        if groups.len() < 2 {
            return Ok(TestResult::no_comparison());
        }
        ensure_finite(values, "numeric comparison sample")?;
        if values.iter().all(|&v| v == values[0]) {
            return Ok(TestResult::no_comparison());
        }
        if values.len() < MIN_NUMERIC_SAMPLE {
            return Err(AnalysisError::InsufficientData {
                test: "test selection",
                required: MIN_NUMERIC_SAMPLE,
                actual: values.len(),
            });
        }

        let parametric = self.checker.is_normal(values)?
            && groups.iter().try_fold(true, |all, group| {
                Ok::<_, AnalysisError>(all && self.group_is_normal(group)?)
            })?;
        tracing::debug!(groups = groups.len(), parametric, "numeric comparison");

        let slices: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
        if parametric {
            run_parametric(&slices)
        } else {
            run_rank_based(&slices)
        }
    }

    /// Small or constant groups count as non-normal.
    fn group_is_normal(&self, group: &[f64]) -> Result<bool> {
        match self.checker.is_normal(group) {
            Ok(normal) => Ok(normal),
            Err(AnalysisError::InsufficientData { .. } | AnalysisError::ZeroVariance { .. }) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn run_ordinal<G: Eq + Hash>(grouping: &[G], codes: &[i64]) -> Result<TestResult> {
    let values: Vec<f64> = codes.iter().map(|&c| c as f64).collect();
    let groups = split_by_group(grouping, &values)?;
    let distinct_codes = codes.iter().any(|&c| c != codes[0]);
    if groups.len() < 2 || !distinct_codes {
        return Ok(TestResult::no_comparison());
    }
    let slices: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
    run_rank_based(&slices)
}

fn run_parametric(groups: &[&[f64]]) -> Result<TestResult> {
    if let [a, b] = groups {
        finish(student_t_test(a, b)?, TestKind::TTest)
    } else {
        finish(one_way_anova(groups)?, TestKind::Anova)
    }
}

fn run_rank_based(groups: &[&[f64]]) -> Result<TestResult> {
    if let [a, b] = groups {
        finish(mann_whitney_u(a, b)?, TestKind::MannWhitneyU)
    } else {
        finish(kruskal_wallis(groups)?, TestKind::KruskalWallis)
    }
}

fn finish(outcome: TestOutcome, kind: TestKind) -> Result<TestResult> {
    Ok(TestResult::new(outcome.p_value, kind))
}

/// Run the selected test with default settings (alpha 0.05).
pub fn select_and_run_test<G: Eq + Hash>(
    grouping: &[G],
    numeric: Option<&[f64]>,
    ordinal_codes: Option<&[i64]>,
) -> Result<TestResult> {
    TestSelector::default().select_and_run(grouping, numeric, ordinal_codes)
}

/// Typed form of [`select_and_run_test`].
pub fn run_comparison<G: Eq + Hash>(grouping: &[G], comparison: Comparison<'_>) -> Result<TestResult> {
    TestSelector::default().run(grouping, comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neither_input_rejected() {
        assert!(matches!(
            select_and_run_test(&[1, 2, 1], None, None),
            Err(AnalysisError::MissingComparisonVariable)
        ));
    }

    #[test]
    fn test_both_inputs_rejected() {
        assert!(matches!(
            select_and_run_test(&[1, 2, 1], Some(&[1.0, 2.0, 3.0]), Some(&[1, 2, 3])),
            Err(AnalysisError::ConflictingComparisonVariables)
        ));
    }

    #[test]
    fn test_single_group_ordinal_is_degenerate() {
        let r = select_and_run_test(&["A", "A", "A"], None, Some(&[1, 2, 3])).unwrap();
        assert_eq!(r, TestResult::no_comparison());
    }

    #[test]
    fn test_single_ordinal_code_is_degenerate() {
        let r = run_comparison(&["A", "B", "A", "B"], Comparison::Ordinal(&[2, 2, 2, 2])).unwrap();
        assert_eq!(r, TestResult::no_comparison());
    }

    #[test]
    fn test_constant_numeric_is_degenerate() {
        let r = run_comparison(&[1, 2, 1, 2], Comparison::Numeric(&[5.0; 4])).unwrap();
        assert_eq!(r, TestResult::no_comparison());
    }

    #[test]
    fn test_tiny_numeric_sample_rejected() {
        assert!(matches!(
            run_comparison(&[1, 2], Comparison::Numeric(&[1.0, 2.0])),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_ordinal_uses_rank_tests() {
        let r = run_comparison(
            &["x", "x", "x", "y", "y", "y"],
            Comparison::Ordinal(&[0, 1, 1, 2, 3, 3]),
        )
        .unwrap();
        assert_eq!(r.test, Some(TestKind::MannWhitneyU));

        let r = run_comparison(
            &["x", "y", "z", "x", "y", "z"],
            Comparison::Ordinal(&[0, 1, 2, 0, 1, 2]),
        )
        .unwrap();
        assert_eq!(r.test, Some(TestKind::KruskalWallis));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            run_comparison(&[1, 2, 3], Comparison::Numeric(&[1.0, 2.0])),
            Err(AnalysisError::LengthMismatch { .. })
        ));
    }
}
