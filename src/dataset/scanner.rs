//! Data directory scanning and readiness aggregation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use super::inspector::{file_name, inspect, read_header};
use super::types::{DatasetMetadata, ReadinessChecks, ReadinessReport, ReadinessStatus};
use crate::error::ScanError;
use crate::metrics;

/// Extension that marks a candidate dataset. Matched case-sensitively.
pub const CSV_EXTENSION: &str = ".csv";

/// Scans one data directory for CSV datasets.
///
/// Holds only the directory path; every call re-reads the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetScanner {
    data_dir: PathBuf,
}

impl DatasetScanner {
    /// Create a scanner rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory this scanner reads.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Inspect every `*.csv` file, sorted by file name.
    ///
    /// A missing directory, or a path that is not a directory, yields an
    /// empty list. The first file that fails
    /// inspection fails the whole listing.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn list_datasets(&self) -> Result<Vec<DatasetMetadata>, ScanError> {
        let start = Instant::now();
        metrics::inc_scans(metrics::SCAN_KIND_LIST);

        if !self.data_dir.is_dir() {
            debug!("Data directory missing or not a directory, returning empty listing");
            return Ok(Vec::new());
        }

        let mut datasets = Vec::new();
        for path in self.csv_files()? {
            let meta = inspect(&path).inspect_err(|_| metrics::inc_inspect_failures())?;
            datasets.push(meta);
        }

        metrics::record_scan_latency(start, metrics::SCAN_KIND_LIST);
        info!(count = datasets.len(), "Listed datasets");
        Ok(datasets)
    }

    /// Run the readiness gates in order, stopping at the first structural failure.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn readiness_check(&self) -> ReadinessReport {
        let start = Instant::now();
        metrics::inc_scans(metrics::SCAN_KIND_READINESS);

        let report = self.run_gates();

        metrics::record_scan_latency(start, metrics::SCAN_KIND_READINESS);
        metrics::inc_readiness_checks(report.status);
        info!(
            status = %report.status,
            ready = report.ready,
            csv_count = report.checks.csv_count,
            csv_unreadable = report.checks.csv_unreadable,
            "Readiness check finished"
        );
        report
    }

    fn run_gates(&self) -> ReadinessReport {
        let dir = &self.data_dir;
        let mut checks = ReadinessChecks::default();

        if !dir.exists() {
            warn!("Data directory is missing");
            checks
                .errors
                .push(format!("Missing data directory: {}", dir.display()));
            return ReadinessReport::failed(ReadinessStatus::Error, checks);
        }
        checks.data_dir_exists = true;

        if !dir.is_dir() {
            warn!("Data path is not a directory");
            checks
                .errors
                .push(format!("data path is not a directory: {}", dir.display()));
            return ReadinessReport::failed(ReadinessStatus::Error, checks);
        }
        checks.data_dir_is_dir = true;

        let files = match self.csv_files() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "Data directory could not be listed");
                checks.errors.push(e.to_string());
                return ReadinessReport::failed(ReadinessStatus::Error, checks);
            }
        };
        checks.csv_count = files.len() as u64;

        if files.is_empty() {
            warn!("No CSV files found");
            checks
                .errors
                .push("No CSV files found in data/ (expected at least one).".to_string());
            return ReadinessReport::failed(ReadinessStatus::Degraded, checks);
        }

        for path in &files {
            let name = file_name(path);
            match read_header(path) {
                Ok(Some(_)) => checks.csv_readable += 1,
                Ok(None) => {
                    warn!(file = %name, "CSV file is empty");
                    checks.csv_unreadable += 1;
                    checks.errors.push(format!("{name}: empty file (no header)."));
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "CSV file is unreadable");
                    checks.csv_unreadable += 1;
                    checks
                        .errors
                        .push(format!("{name}: could not open/read ({}).", root_cause(&e)));
                }
            }
        }

        ReadinessReport::completed(checks)
    }

    /// Immediate children named `*.csv`, sorted by file name.
    fn csv_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let read_dir_err = |source: std::io::Error| ScanError::ReadDir {
            path: self.data_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let name = entry.file_name();
            // Names that are not valid UTF-8 cannot be reported in JSON.
            let Some(name) = name.to_str() else {
                continue;
            };
            if is_csv_name(name) {
                files.push(entry.path());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!(count = files.len(), "Enumerated CSV candidates");
        Ok(files)
    }
}

/// Whether a file name matches `*.csv`.
pub fn is_csv_name(name: &str) -> bool {
    name.ends_with(CSV_EXTENSION)
}

/// Innermost error text, without the path prefix the message already carries.
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
