//! OpenAPI document and Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, ServiceInfo};
use crate::dataset::{
    DatasetListResponse, DatasetMetadata, ReadinessChecks, ReadinessReport, ReadinessStatus,
};

/// Path of the interactive documentation.
pub const DOCS_PATH: &str = "/docs";

/// Path of the raw OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the public endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Dataset Dashboard Backend"),
    paths(handlers::root, handlers::datasets, handlers::health),
    components(schemas(
        ServiceInfo,
        DatasetListResponse,
        DatasetMetadata,
        ReadinessReport,
        ReadinessChecks,
        ReadinessStatus
    ))
)]
pub struct ApiDoc;

/// Swagger UI serving [`ApiDoc`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/".to_string()));
        assert!(paths.contains(&"/datasets".to_string()));
        assert!(paths.contains(&"/health".to_string()));
    }
}
