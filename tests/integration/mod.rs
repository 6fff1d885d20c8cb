//! Integration tests for the dataset dashboard.
//!
//! Each test builds its own data directory under a temp dir and drives the
//! public library API or the full router against it.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use dataset_dashboard::api::{create_router, AppState};
use dataset_dashboard::dataset::{inspect, DatasetScanner, ReadinessReport, ReadinessStatus};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

/// Create `<tmp>/data` populated with the given files.
fn data_dir(root: &Path, files: &[(&str, &str)]) -> std::path::PathBuf {
    let dir = root.join("data");
    std::fs::create_dir_all(&dir).unwrap();
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).unwrap();
    }
    dir
}

#[test]
fn listing_returns_one_entry_per_csv_with_line_based_row_counts() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = data_dir(
        tmp.path(),
        &[
            ("orders.csv", "order_id,total\n1,9.99\n2,19.50\n"),
            ("customers.csv", "id,name,email\n1,Ada,ada@example.com\n"),
            ("inventory.csv", "sku,qty\nA1,3\nB2,0\nC3,12\nD4,7\n"),
        ],
    );

    let datasets = DatasetScanner::new(&dir).list_datasets().unwrap();

    let summary: Vec<_> = datasets
        .iter()
        .map(|d| (d.id.as_str(), d.row_count, d.columns.len()))
        .collect();
    assert_eq!(
        summary,
        vec![("customers", 1, 3), ("inventory", 4, 2), ("orders", 2, 2)]
    );
}

#[test]
fn listing_and_inspect_agree() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = data_dir(tmp.path(), &[("sample.csv", "id,name\n1,Ada\n2,Grace\n3,Linus\n")]);

    let listed = DatasetScanner::new(&dir).list_datasets().unwrap();
    let inspected = inspect(&dir.join("sample.csv")).unwrap();

    assert_eq!(listed, vec![inspected]);
}

#[test]
fn missing_directory_is_empty_listing_and_error_readiness() {
    let tmp = tempfile::tempdir().unwrap();
    let scanner = DatasetScanner::new(tmp.path().join("data"));

    assert!(scanner.list_datasets().unwrap().is_empty());

    let report = scanner.readiness_check();
    assert_eq!(report.status, ReadinessStatus::Error);
    assert!(!report.ready);
    assert!(!report.checks.data_dir_exists);
}

#[test]
fn empty_csv_is_listed_but_fails_readiness() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = data_dir(tmp.path(), &[("blank.csv", ""), ("good.csv", "a\n1\n")]);
    let scanner = DatasetScanner::new(&dir);

    let datasets = scanner.list_datasets().unwrap();
    assert_eq!(datasets[0].filename, "blank.csv");
    assert_eq!(datasets[0].row_count, 0);
    assert!(datasets[0].columns.is_empty());

    let report = scanner.readiness_check();
    assert_eq!(report.status, ReadinessStatus::Degraded);
    assert_eq!(report.checks.csv_readable, 1);
    assert_eq!(report.checks.csv_unreadable, 1);
    assert_eq!(report.checks.errors, vec!["blank.csv: empty file (no header)."]);
}

#[tokio::test]
async fn health_endpoint_round_trips_the_report() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = data_dir(tmp.path(), &[("valid.csv", "id,name\n1,Ada\n")]);
    let app = create_router(AppState::new(DatasetScanner::new(&dir)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: ReadinessReport = serde_json::from_slice(&body).unwrap();
    assert_eq!(report.status, ReadinessStatus::Ok);
    assert_eq!(report.datasets_found, Some(1));
}

#[tokio::test]
async fn health_endpoint_returns_503_for_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let app = create_router(AppState::new(DatasetScanner::new(tmp.path().join("data"))));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn blank_lines_are_rows_and_blank_header_is_readable() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = data_dir(tmp.path(), &[("gap.csv", "id\n1\n\n2\n"), ("nl.csv", "\n")]);
    let scanner = DatasetScanner::new(&dir);

    let datasets = scanner.list_datasets().unwrap();
    let summary: Vec<_> = datasets
        .iter()
        .map(|d| (d.filename.as_str(), d.row_count, d.columns.len()))
        .collect();
    assert_eq!(summary, vec![("gap.csv", 3, 1), ("nl.csv", 0, 0)]);

    let report = scanner.readiness_check();
    assert_eq!(report.status, ReadinessStatus::Ok);
    assert_eq!(report.checks.csv_readable, 2);
}
