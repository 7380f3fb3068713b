//! Error types for the regression-gate pipeline.
//!
//! Every failure here is terminal for the run: the CLI propagates the error
//! to process exit, there are no retries anywhere.

use crate::junit::JunitError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading reports or checking thresholds.
#[derive(Error, Debug)]
pub enum TtgError {
    /// An input path does not exist on the filesystem.
    #[error("path '{}' not found", .0.display())]
    NotFound(PathBuf),

    /// A file or directory could not be read during the scan.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report file exists but is not valid JUnit XML.
    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: JunitError,
    },

    /// One or more individual tests regressed past the threshold.
    ///
    /// Payload maps each offending test key to its percentage change.
    #[error(
        "test time increase threshold exceeded for the following testcases:\n{}",
        format_percentages(.regressions)
    )]
    TestTimeExceeded { regressions: BTreeMap<String, f64> },

    /// Aggregate test time regressed past the threshold.
    ///
    /// Payload maps each additive test (present only in the compare run) to
    /// its duration in seconds.
    #[error(
        "total test time increase threshold exceeded ({total_pct:+.2}%), added tests (in seconds):\n{}",
        format_durations(.additive)
    )]
    TotalTimeExceeded {
        total_pct: f64,
        additive: BTreeMap<String, f64>,
    },
}

fn format_percentages(map: &BTreeMap<String, f64>) -> String {
    map.iter()
        .map(|(key, pct)| format!("  {key}: {pct:+.2}%"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_durations(map: &BTreeMap<String, f64>) -> String {
    map.iter()
        .map(|(key, secs)| format!("  {key}: {secs:.3}s"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_time_exceeded_display_lists_offenders() {
        let mut regressions = BTreeMap::new();
        regressions.insert("suite.Class.test_a".to_string(), 15.0);
        regressions.insert("suite.Class.test_b".to_string(), 42.5);

        let msg = TtgError::TestTimeExceeded { regressions }.to_string();
        assert!(msg.contains("threshold exceeded"));
        assert!(msg.contains("suite.Class.test_a: +15.00%"));
        assert!(msg.contains("suite.Class.test_b: +42.50%"));
    }

    #[test]
    fn test_total_time_exceeded_display_lists_added_tests() {
        let mut additive = BTreeMap::new();
        additive.insert("suite.Class.test_new".to_string(), 100.0);

        let msg = TtgError::TotalTimeExceeded {
            total_pct: 2000.0,
            additive,
        }
        .to_string();
        assert!(msg.contains("+2000.00%"));
        assert!(msg.contains("suite.Class.test_new: 100.000s"));
    }

    #[test]
    fn test_not_found_display_carries_path() {
        let msg = TtgError::NotFound(PathBuf::from("/no/such/dir")).to_string();
        assert!(msg.contains("/no/such/dir"));
        assert!(msg.contains("not found"));
    }
}
