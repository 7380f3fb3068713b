//! Test-Time Gate CLI.
//!
//! Compares two JUnit-style report trees and exits nonzero when per-test or
//! aggregate execution time regressed past the allowed percentage.
#![forbid(unsafe_code)]

mod progress;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ttg_common::progress::{NullProgress, ProgressObserver};
use ttg_common::{TtgError, check, delta, report};

use progress::ScanProgress;

#[derive(Parser)]
#[command(name = "ttg")]
#[command(author, version, about = "Gate CI on test execution time regressions")]
struct Cli {
    /// Base reports (single file or directory) to compare against
    base: PathBuf,

    /// Reports (single file or directory) to compare to base
    compare_to: PathBuf,

    /// Percentage increase allowed for test time difference
    #[arg(short = 't', long, default_value_t = 10.0)]
    threshold: f64,

    /// Disable the scan progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let progress: Box<dyn ProgressObserver> = if !cli.no_progress && std::io::stderr().is_terminal()
    {
        Box::new(ScanProgress::new())
    } else {
        Box::new(NullProgress)
    };

    match run_gate(&cli, progress.as_ref()) {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "test time within threshold: {} shared, {} added, {} removed; total {:.3}s -> {:.3}s ({:+.2}%)",
                    summary.shared_tests,
                    summary.additive_tests,
                    summary.removed_tests,
                    summary.total_base_secs,
                    summary.total_compare_secs,
                    summary.total_pct_changed,
                );
            }
            Ok(())
        }
        Err(err) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&failure_json(&err))?);
            }
            Err(err.into())
        }
    }
}

/// Load both report sets and run the threshold gates.
fn run_gate(
    cli: &Cli,
    progress: &dyn ProgressObserver,
) -> Result<check::CheckSummary, TtgError> {
    let base = report::load(&cli.base, progress)?;
    let compare = report::load(&cli.compare_to, progress)?;
    info!(
        base_tests = base.len(),
        compare_tests = compare.len(),
        threshold_pct = cli.threshold,
        "loaded reports"
    );

    let changed = delta::percentage_changed(&base, &compare);
    check::check(&changed, &base, &compare, cli.threshold)
}

fn failure_json(err: &TtgError) -> serde_json::Value {
    match err {
        TtgError::TestTimeExceeded { regressions } => json!({
            "status": "failed",
            "reason": "test_time_exceeded",
            "regressions_pct": regressions,
        }),
        TtgError::TotalTimeExceeded { total_pct, additive } => json!({
            "status": "failed",
            "reason": "total_time_exceeded",
            "total_pct_changed": total_pct,
            "added_tests_secs": additive,
        }),
        other => json!({
            "status": "error",
            "message": other.to_string(),
        }),
    }
}
