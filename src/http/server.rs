//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the admin catalogue routes
//! - Mount them under the configured path
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::catalogue::Catalogue;
use crate::config::CatalogueConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::Shutdown;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub api_key: Arc<str>,
    /// Configured display base path. Derived per request when unset.
    pub base_path: Option<Arc<str>>,
}

/// HTTP server exposing the catalogue.
pub struct AdminServer {
    router: Router,
    config: CatalogueConfig,
}

impl AdminServer {
    /// Create a new server over `catalogue`.
    pub fn new(config: CatalogueConfig, catalogue: Arc<Catalogue>) -> Self {
        let state = AppState {
            catalogue,
            api_key: Arc::from(config.admin.api_key.as_str()),
            base_path: config.admin.base_path.as_deref().map(Arc::from),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &CatalogueConfig, state: AppState) -> Router {
        let admin = if config.admin.enabled {
            setup_admin_router(state)
        } else {
            Router::new()
        };
        let app = if config.server.mount_path.is_empty() {
            admin
        } else {
            Router::new().nest(&config.server.mount_path, admin)
        };

        app.layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_path = %self.config.server.mount_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
