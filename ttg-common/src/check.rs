//! Threshold checking — the decision point of the run.
//!
//! Two gates, evaluated in order. The per-test gate fires first; the
//! aggregate gate is only reached when every shared test is within the
//! threshold.

use crate::delta::DeltaSet;
use crate::errors::TtgError;
use crate::report::ReportSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Outcome of a passing run, for logs and `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    /// Tests present in both runs.
    pub shared_tests: usize,
    /// Tests only in the compare run.
    pub additive_tests: usize,
    /// Tests only in the base run.
    pub removed_tests: usize,
    pub total_base_secs: f64,
    pub total_compare_secs: f64,
    /// Aggregate percentage change; non-finite when the base total is zero.
    pub total_pct_changed: f64,
}

/// Gate the run against `threshold` (a percentage).
///
/// Step 1: any per-test delta strictly above the threshold fails the run
/// with the full offender map; the aggregate gate is not evaluated.
///
/// Step 2: the aggregate change `(total_compare - total_base) / total_base *
/// 100` is compared against the same threshold. The division is deliberately
/// unguarded: a zero base total yields `inf` (fails any threshold) or `NaN`
/// when both totals are zero (passes, as every NaN comparison is false). On
/// failure the payload is the additive tests with their durations.
pub fn check(
    delta: &DeltaSet,
    base: &ReportSet,
    compare: &ReportSet,
    threshold: f64,
) -> Result<CheckSummary, TtgError> {
    let regressions: BTreeMap<String, f64> = delta
        .iter()
        .filter(|(_, pct)| **pct > threshold)
        .map(|(key, pct)| (key.clone(), *pct))
        .collect();
    if !regressions.is_empty() {
        return Err(TtgError::TestTimeExceeded { regressions });
    }

    let additive: BTreeMap<String, f64> = compare
        .iter()
        .filter(|(key, _)| !base.contains_key(*key))
        .map(|(key, secs)| (key.clone(), *secs))
        .collect();
    let removed = base.keys().filter(|key| !compare.contains_key(*key)).count();

    let total_base: f64 = base.values().sum();
    let total_compare: f64 = compare.values().sum();
    if total_base == 0.0 {
        warn!("total base time is zero; aggregate percentage change is undefined");
    }
    let total_pct = (total_compare - total_base) / total_base * 100.0;
    debug!(
        total_base_secs = total_base,
        total_compare_secs = total_compare,
        total_pct_changed = total_pct,
        additive = additive.len(),
        "aggregate check"
    );

    if total_pct > threshold {
        return Err(TtgError::TotalTimeExceeded {
            total_pct,
            additive,
        });
    }

    Ok(CheckSummary {
        shared_tests: delta.len(),
        additive_tests: additive.len(),
        removed_tests: removed,
        total_base_secs: total_base,
        total_compare_secs: total_compare,
        total_pct_changed: total_pct,
    })
}
