//! One-way analysis of variance (F-test).

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use housecast_core::errors::AnalysisError;

use super::types::TestOutcome;
use crate::descriptive::mean;
use crate::Result;

/// Test whether `groups` share a common mean.
pub fn one_way_anova(groups: &[&[f64]]) -> Result<TestOutcome> {
    let k = groups.len();
    if k < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "ANOVA (groups)",
            required: 2,
            actual: k,
        });
    }
    if let Some(empty) = groups.iter().position(|g| g.is_empty()) {
        return Err(AnalysisError::empty(format!("ANOVA group {empty}")));
    }
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return Err(AnalysisError::InsufficientData {
            test: "ANOVA (observations)",
            required: k + 1,
            actual: n_total,
        });
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let m = mean(group);
        ss_between += group.len() as f64 * (m - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;

    if ss_within <= 0.0 {
        return Ok(if ss_between > 0.0 {
            TestOutcome::new(f64::INFINITY, 0.0)
        } else {
            TestOutcome::new(f64::NAN, 1.0)
        });
    }

    let f = (ss_between / df_between) / (ss_within / df_within);
    let dist = FisherSnedecor::new(df_between, df_within)
        .map_err(|e| AnalysisError::InvalidArgument(format!("F distribution: {e}")))?;

    Ok(TestOutcome::new(f, dist.sf(f)))
}
