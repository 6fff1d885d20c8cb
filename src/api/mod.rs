//! HTTP API module for dataset listing, health, and docs endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
