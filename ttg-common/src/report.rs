//! Report loading and flattening.
//!
//! Turns a report file, or a directory tree of report files, into a flat
//! [`ReportSet`]: one entry per test, keyed by
//! `"<suite-name>.<class-name>.<test-name>"` where the suite name comes from
//! the file's root container.

use crate::errors::TtgError;
use crate::junit::{self, JunitReport};
use crate::progress::ProgressObserver;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flattened mapping from composite test key to duration in seconds.
///
/// Ordered so diagnostics and error payloads render deterministically.
pub type ReportSet = BTreeMap<String, f64>;

/// Load a report set from `path`.
///
/// A file is parsed as one report. A directory is walked recursively and
/// every file ending in `.xml` is parsed and merged; on duplicate keys the
/// later-walked file wins. Other files are skipped silently. The observer is
/// notified per file during directory scans and never affects the result.
pub fn load(path: &Path, progress: &dyn ProgressObserver) -> Result<ReportSet, TtgError> {
    if !path.exists() {
        return Err(TtgError::NotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return load_file(path);
    }

    let mut files = Vec::new();
    collect_xml_files(path, &mut files)?;
    debug!(root = %path.display(), files = files.len(), "scanning report directory");

    progress.begin(files.len() as u64);
    let mut merged = ReportSet::new();
    for file in &files {
        progress.file(file);
        let records = load_file(file)?;
        // BTreeMap::extend overwrites existing keys: last-write-wins.
        merged.extend(records);
    }
    progress.finish();

    Ok(merged)
}

fn load_file(path: &Path) -> Result<ReportSet, TtgError> {
    let content = fs::read_to_string(path).map_err(|source| TtgError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = junit::parse_str(&content).map_err(|source| TtgError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(flatten(&report))
}

/// Flatten a parsed report into composite keys.
///
/// Every test leaf is keyed under the root container's name; nested suite
/// names are not part of the key.
pub fn flatten(report: &JunitReport) -> ReportSet {
    let mut records = ReportSet::new();
    for case in &report.cases {
        let key = format!("{}.{}.{}", report.suite_name, case.classname, case.name);
        records.insert(key, case.time_secs);
    }
    records
}

fn collect_xml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TtgError> {
    let entries = fs::read_dir(dir).map_err(|source| TtgError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| TtgError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_xml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "xml") {
            out.push(path);
        } else {
            debug!(file = %path.display(), "skipping non-xml file");
        }
    }
    Ok(())
}
