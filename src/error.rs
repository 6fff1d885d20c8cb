//! Unified error types for the dataset dashboard.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the dataset dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while inspecting a single CSV file.
#[derive(Error, Debug)]
pub enum InspectError {
    /// Filesystem metadata could not be read.
    #[error("failed to stat {path}: {source}")]
    Metadata {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// File could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A row could not be read or decoded as UTF-8 CSV.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },

    /// Modification time could not be rendered.
    #[error("failed to format modification time of {path}: {source}")]
    Timestamp {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: time::error::Format,
    },
}

/// Directory enumeration errors.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The data directory exists but could not be listed.
    #[error("failed to read data directory {path}: {source}")]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// One of the candidate files failed inspection.
    #[error(transparent)]
    Inspect(#[from] InspectError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message() {
        let err = DashboardError::InvalidConfig("PORT must be non-zero".to_string());
        assert_eq!(err.to_string(), "invalid configuration: PORT must be non-zero");
    }

    #[test]
    fn inspect_error_names_the_file() {
        let err = InspectError::Open {
            path: PathBuf::from("/data/sales.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        let message = err.to_string();
        assert!(message.contains("/data/sales.csv"));
        assert!(message.starts_with("failed to open"));
    }

    #[test]
    fn scan_error_is_transparent_over_inspect_error() {
        let inner = InspectError::Open {
            path: PathBuf::from("a.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let expected = inner.to_string();

        let err = ScanError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
