//! Dataset dashboard backend.
//!
//! Exposes metadata about the CSV files in a data directory over a small
//! HTTP API, plus a readiness check that reports whether every dataset can
//! be read.
//!
//! ```text
//! GET /          service descriptor
//! GET /datasets  {"datasets": [{id, filename, row_count, columns, size_bytes, modified_time}]}
//! GET /health    readiness report, 200 when ready, 503 otherwise
//! GET /docs      Swagger UI
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`dataset`]: CSV inspection and directory scanning
//! - [`api`]: HTTP API handlers and routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use dataset::DatasetScanner;
pub use error::{DashboardError, Result};
