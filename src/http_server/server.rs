//! # HTTP Server
//!
//! Combines the book routes and the health check behind one CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::catalog::{Clock, SystemClock};
use crate::observability::{log_event_with_fields, Event};
use crate::rest_api::RestServer;
use crate::storage::CatalogStore;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// HTTP server for the catalog API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store` using the system clock
    pub fn new(config: HttpServerConfig, store: Arc<dyn CatalogStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Create a server with a caller-supplied clock
    pub fn with_clock(
        config: HttpServerConfig,
        store: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let router = Self::build_router(&config, store, clock);
        Self { config, router }
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(config.origin_headers()))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    fn build_router(
        config: &HttpServerConfig,
        store: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
    ) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(RestServer::with_clock(store, clock).router())
            .layer(Self::cors_layer(config))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerListening, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await
    }
}
