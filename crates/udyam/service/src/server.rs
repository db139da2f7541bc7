//! Server setup and lifecycle.

use crate::api::{create_router, AppState};
use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::store::InMemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use udyam_types::FormSchema;

/// Registration service server.
pub struct Server {
    config: ServiceConfig,
    state: AppState,
}

impl Server {
    /// Create a server, loading the schema document once.
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        let schema = match &config.schema_path {
            Some(path) => FormSchema::load(path)
                .map_err(|err| ApiError::Internal(format!("schema load failed: {err}")))?,
            None => FormSchema::builtin(),
        };

        let state = AppState::new(Arc::new(InMemoryStore::new()), Arc::new(schema));
        Ok(Self { config, state })
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> Result<(), ApiError> {
        let app = create_router(self.state, self.config.enable_cors);

        let listener = TcpListener::bind(self.config.listen_addr)
            .await
            .map_err(|err| ApiError::Internal(format!("bind failed: {err}")))?;

        tracing::info!("udyam service listening on {}", self.config.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| ApiError::Internal(format!("server failed: {err}")))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
