//! Prometheus metrics for dataset scans and readiness checks.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::dataset::ReadinessStatus;

// === Metric Name Constants ===

/// Scans started, labelled by kind.
pub const METRIC_SCANS: &str = "dataset_scans_total";
/// Scan latency metric name.
pub const METRIC_SCAN_LATENCY: &str = "dataset_scan_latency_ms";
/// Files that failed full inspection.
pub const METRIC_INSPECT_FAILURES: &str = "dataset_inspect_failures_total";
/// Readiness checks, labelled by resulting status.
pub const METRIC_READINESS_CHECKS: &str = "readiness_checks_total";

/// `kind` label for listing scans.
pub const SCAN_KIND_LIST: &str = "list";
/// `kind` label for readiness scans.
pub const SCAN_KIND_READINESS: &str = "readiness";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_SCANS, "Total number of data directory scans");
    describe_histogram!(
        METRIC_SCAN_LATENCY,
        "Data directory scan latency in milliseconds"
    );
    describe_counter!(
        METRIC_INSPECT_FAILURES,
        "Total number of CSV files that failed inspection"
    );
    describe_counter!(
        METRIC_READINESS_CHECKS,
        "Total number of readiness checks by status"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the scan counter.
pub fn inc_scans(kind: &'static str) {
    counter!(METRIC_SCANS, "kind" => kind).increment(1);
}

/// Record scan latency.
pub fn record_scan_latency(start: Instant, kind: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_SCAN_LATENCY, "kind" => kind).record(latency_ms);
}

/// Increment the inspection failure counter.
pub fn inc_inspect_failures() {
    counter!(METRIC_INSPECT_FAILURES).increment(1);
}

/// Increment the readiness counter for the given outcome.
pub fn inc_readiness_checks(status: ReadinessStatus) {
    counter!(METRIC_READINESS_CHECKS, "status" => status.to_string()).increment(1);
}
