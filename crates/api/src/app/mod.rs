//! HTTP API application wiring (Axum router + service wiring).
//!
//! If you're new to Rust, this folder is structured like:
//! - `services.rs`: store wiring (in-memory by default, Postgres behind the
//!   `postgres` feature)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::config::ServerConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// Everything is mounted under the `/api` prefix: the echo endpoint, the
/// delegated user and comment route groups, and (when enabled) the generated
/// API documentation.
pub fn build_app(config: &ServerConfig, services: Arc<services::AppServices>) -> Router {
    let mut api = routes::router();
    if config.docs_enabled {
        api = api.nest("/docs", routes::docs::router(config));
    }

    Router::new()
        .nest("/api", api.layer(Extension(services)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_log)))
}
