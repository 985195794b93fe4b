//! HTTP server bootstrap.

use std::sync::Arc;

use axum::Router;

use siteboard_core::AppError;

use crate::app::{self, services::AppServices};
use crate::config::ServerConfig;

/// The assembled server: configuration plus router, ready to bind.
pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    /// Wire up services and the router.
    ///
    /// Initialization failures propagate to the caller; the entry point
    /// decides whether to abort the process.
    pub async fn new(config: ServerConfig) -> Result<Self, AppError> {
        let services = Arc::new(AppServices::build().await?);
        let router = app::build_app(&config, services);
        Ok(Self { config, router })
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn serve(self) -> Result<(), AppError> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::traced(format!("failed to bind {addr}: {e}")))?;

        match listener.local_addr() {
            Ok(local) => tracing::info!("listening on {local}"),
            Err(_) => tracing::info!("listening on {addr}"),
        }

        axum::serve(listener, self.router)
            .await
            .map_err(|e| AppError::traced(format!("server error: {e}")))
    }
}
