//! HTTP front end.
//!
//! Routes:
//! - `GET  /`        - static analyzer page
//! - `POST /analyze` - run the verifier, JSON in and JSON out

pub mod handlers;
pub mod intake;

use crate::config::Config;
use crate::orchestrator::Orchestrator;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Build the router around a shared orchestrator.
pub fn build_router(orchestrator: Arc<Orchestrator>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(orchestrator)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let orchestrator = Arc::new(Orchestrator::new(config.verifier.clone()));
    let app = build_router(orchestrator, config.server.max_body_bytes);

    info!(
        timeout_seconds = config.verifier.timeout_seconds,
        "Listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
