//! Terminal progress bar for directory scans.

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use ttg_common::ProgressObserver;

/// indicatif-backed observer. One bar per scan; cleared on finish so the
/// gate's own output is not interleaved with bar fragments.
#[derive(Default)]
pub struct ScanProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for ScanProgress {
    fn begin(&self, total_files: u64) {
        let bar = ProgressBar::new(total_files);
        let style = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("=> "));
        *self.bar.borrow_mut() = Some(bar);
    }

    fn file(&self, path: &Path) {
        if let Some(bar) = &*self.bar.borrow() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            bar.set_message(name);
            bar.inc(1);
        }
    }

    fn finish(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}
