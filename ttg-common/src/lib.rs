//! Core library for Test-Time Gate (`ttg`).
//!
//! Compares two sets of JUnit-style test reports and flags runs where
//! individual test times or the aggregate test time regressed past a
//! percentage threshold. The pipeline is four stages, all synchronous:
//!
//! 1. [`report::load`] — flatten report files into a [`ReportSet`]
//! 2. [`delta::percentage_changed`] — per-test percentage deltas
//! 3. [`check::check`] — per-test then aggregate threshold gates
//! 4. the caller reports: success summary or a [`TtgError`] payload

pub mod check;
pub mod delta;
pub mod errors;
pub mod junit;
pub mod progress;
pub mod report;

pub use check::CheckSummary;
pub use errors::TtgError;
pub use progress::{NullProgress, ProgressObserver};
pub use report::ReportSet;
