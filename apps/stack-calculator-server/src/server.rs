//! HTTP host: binds the listener and serves the stack calculator routes

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use axum::Router;
use stack_calculator::Service;
use stack_calculator::api::rest::register_routes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Build the full application router for `service`.
pub fn build_router(service: Arc<Service>) -> Router {
    register_routes(Router::new(), service).layer(TraceLayer::new_for_http())
}

/// Serve until `cancel` fires.
///
/// On cancellation, pending delayed pops are interrupted first, then
/// in-flight requests drain.
///
/// # Errors
/// Fails if the address cannot be bound or the server stops abnormally.
pub async fn serve(config: &AppConfig, cancel: CancellationToken) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_addr))?;

    let service = Arc::new(Service::new(&config.stack_calculator));
    let router = build_router(Arc::clone(&service));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    let shutdown = async move {
        cancel.cancelled().await;
        service.shutdown();
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}
