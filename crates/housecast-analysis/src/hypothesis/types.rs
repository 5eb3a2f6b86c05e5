//! Core types for hypothesis testing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison tests the selector can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// Student's two-sample t-test (pooled variance).
    TTest,
    /// One-way analysis of variance.
    Anova,
    /// Mann-Whitney U rank-sum test.
    MannWhitneyU,
    /// Kruskal-Wallis H test.
    KruskalWallis,
}

impl TestKind {
    /// Display name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TTest => "T-Test",
            Self::Anova => "ANOVA Test",
            Self::MannWhitneyU => "Mann Whitney U Test",
            Self::KruskalWallis => "Kruskal-Wallis Test",
        }
    }

    /// True for the rank-based tests.
    pub fn is_rank_based(&self) -> bool {
        matches!(self, Self::MannWhitneyU | Self::KruskalWallis)
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an automatically selected comparison.
///
/// `test` is `None` when no meaningful comparison was possible; the p-value is
/// then `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub p_value: f64,
    pub test: Option<TestKind>,
}

impl TestResult {
    pub fn new(p_value: f64, test: TestKind) -> Self {
        Self {
            p_value: sanitize_p_value(p_value),
            test: Some(test),
        }
    }

    /// The `(1.0, None)` result for degenerate inputs.
    pub fn no_comparison() -> Self {
        Self {
            p_value: 1.0,
            test: None,
        }
    }

    /// Report label, e.g. `"T-Test (p-value): 0.012"`.
    pub fn label(&self) -> String {
        match self.test {
            Some(kind) => format!("{} (p-value): {:.3}", kind, self.p_value),
            None => format!("No test (p-value): {:.3}", self.p_value),
        }
    }
}

/// Statistic and p-value of one concrete test run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

impl TestOutcome {
    pub(crate) fn new(statistic: f64, p_value: f64) -> Self {
        Self {
            statistic,
            p_value: sanitize_p_value(p_value),
        }
    }
}

/// Clamp into `[0, 1]`; `NaN` (undefined statistic) becomes `1.0`.
pub fn sanitize_p_value(p: f64) -> f64 {
    if p.is_nan() {
        1.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
