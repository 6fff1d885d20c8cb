//! Dataset metadata and readiness report types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Metadata describing one CSV dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatasetMetadata {
    /// File name without the extension.
    pub id: String,
    /// File name including the extension.
    pub filename: String,
    /// Number of data rows, excluding the header.
    pub row_count: u64,
    /// Header fields, trimmed, in file order.
    pub columns: Vec<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Last modification time, UTC, ISO-8601 with offset.
    pub modified_time: String,
}

/// Overall readiness status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReadinessStatus {
    /// Every gate passed and every file is readable.
    Ok,
    /// Reachable, but no usable datasets or some unreadable files.
    Degraded,
    /// The data directory is missing or not a directory.
    Error,
}

/// Individual readiness gates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessChecks {
    /// Whether the data directory exists.
    pub data_dir_exists: bool,
    /// Whether the data path is a directory.
    pub data_dir_is_dir: bool,
    /// Number of `*.csv` candidates.
    pub csv_count: u64,
    /// Candidates whose header row could be read.
    pub csv_readable: u64,
    /// Candidates that failed to open, read, or were empty.
    pub csv_unreadable: u64,
    /// Human-readable failure messages, in check order.
    pub errors: Vec<String>,
}

/// Structured readiness report returned by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessReport {
    /// Overall status.
    pub status: ReadinessStatus,
    /// True only when the service can serve every dataset.
    pub ready: bool,
    /// Number of candidates found, when the scan got that far.
    pub datasets_found: Option<u64>,
    /// Per-gate breakdown.
    pub checks: ReadinessChecks,
}

impl ReadinessReport {
    /// Report for a structural failure that stopped the pipeline early.
    pub fn failed(status: ReadinessStatus, checks: ReadinessChecks) -> Self {
        Self {
            status,
            ready: false,
            datasets_found: Some(checks.csv_count),
            checks,
        }
    }

    /// Report once every candidate has been checked.
    pub fn completed(checks: ReadinessChecks) -> Self {
        let ready = checks.csv_unreadable == 0;
        Self {
            status: if ready {
                ReadinessStatus::Ok
            } else {
                ReadinessStatus::Degraded
            },
            ready,
            datasets_found: Some(checks.csv_count),
            checks,
        }
    }
}

/// Response body for `GET /datasets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatasetListResponse {
    /// Datasets sorted by file name.
    pub datasets: Vec<DatasetMetadata>,
}
