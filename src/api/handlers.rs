//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::dataset::{DatasetListResponse, DatasetScanner, ReadinessReport};
use crate::error::ScanError;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "dataset-dashboard-backend";

/// Endpoints advertised by the root endpoint.
pub const ADVERTISED_ENDPOINTS: [&str; 3] = ["/health", "/datasets", "/docs"];

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scanner bound to the configured data directory.
    pub scanner: Arc<DatasetScanner>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state for the given scanner.
    pub fn new(scanner: DatasetScanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Root endpoint response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name.
    pub service: String,
    /// Status: "ok".
    pub status: String,
    /// Available endpoint paths.
    pub endpoints: Vec<String>,
}

/// Errors surfaced by handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Listing failed on one of the files.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The blocking scan task panicked or was cancelled.
    #[error("scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Service descriptor - always returns 200.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service descriptor", body = ServiceInfo))
)]
pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        status: "ok".to_string(),
        endpoints: ADVERTISED_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Dataset listing handler - returns metadata for every CSV in the data directory.
#[utoipa::path(
    get,
    path = "/datasets",
    responses(
        (status = 200, description = "Datasets sorted by file name", body = DatasetListResponse),
        (status = 500, description = "A dataset could not be inspected")
    )
)]
pub async fn datasets(
    State(state): State<AppState>,
) -> Result<Json<DatasetListResponse>, ApiError> {
    let scanner = state.scanner.clone();
    let datasets = tokio::task::spawn_blocking(move || scanner.list_datasets()).await??;

    Ok(Json(DatasetListResponse { datasets }))
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Ready to serve datasets", body = ReadinessReport),
        (status = 503, description = "Not ready", body = ReadinessReport)
    )
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let scanner = state.scanner.clone();
    let report = tokio::task::spawn_blocking(move || scanner.readiness_check()).await?;

    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status, Json(report)))
}

/// Prometheus text exposition; empty when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_lists_endpoints() {
        let response = tokio_test::block_on(root()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn app_state_starts_without_metrics() {
        let state = AppState::new(DatasetScanner::new("/nonexistent"));
        assert!(state.metrics.is_none());
        assert_eq!(
            state.scanner.data_dir(),
            std::path::Path::new("/nonexistent")
        );
    }

    #[test]
    fn api_error_maps_to_500() {
        let err = ApiError::Scan(ScanError::ReadDir {
            path: "/data".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });

        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
