//! Router setup and the listening loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::server::routes::{chapters_handler, content_handler, health_handler, not_found_handler};
use crate::service::DocumentService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DocumentService>,
}

pub fn build_app(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route("/api/chapters", get(chapters_handler))
        .route("/api/content", get(content_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, service: Arc<DocumentService>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "docnav listening");

    axum::serve(listener, build_app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("docnav stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
