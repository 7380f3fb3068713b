//! Progress reporting seam for directory scans.
//!
//! The loader notifies an observer as it walks report files. Observers are
//! decorative only: they cannot fail the run, and [`NullProgress`] (the
//! default) makes every notification a no-op.

use std::path::Path;

/// Receives loader progress notifications during a directory scan.
pub trait ProgressObserver {
    /// A scan is starting over `_total_files` report files.
    fn begin(&self, _total_files: u64) {}

    /// One report file is about to be parsed.
    fn file(&self, _path: &Path) {}

    /// The scan finished (successfully or not).
    fn finish(&self) {}
}

/// Observer that ignores every notification.
pub struct NullProgress;

impl ProgressObserver for NullProgress {}
