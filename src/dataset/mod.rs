//! Dataset discovery for the data directory.
//!
//! This module handles:
//! - Dataset metadata and readiness report types
//! - Single-file CSV inspection
//! - Directory scanning and readiness aggregation

pub mod inspector;
pub mod scanner;
pub mod types;

pub use inspector::{inspect, read_header};
pub use scanner::DatasetScanner;
pub use types::{
    DatasetListResponse, DatasetMetadata, ReadinessChecks, ReadinessReport, ReadinessStatus,
};
