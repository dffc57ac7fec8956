// src/server/mod.rs
// =============================================================================
// The HTTP side of the app: router construction and the serve loop.
//
// Submodules:
// - handlers: the /api/readme handlers, error mapping, CORS, logging
// =============================================================================

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::github::RepoHost;

// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<dyn RepoHost>,
    pub request_timeout: Duration,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/readme",
            get(handlers::get_readme).options(handlers::preflight),
        )
        .layer(middleware::map_response(handlers::add_cors_headers))
        .layer(middleware::from_fn(handlers::log_responses))
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: run until killed
        std::future::pending::<()>().await;
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Router::with_state?
//    - Gives every handler access to AppState via State(..)
//
// 2. What does .layer() do?
//    - Wraps the routes in middleware; here CORS headers and error logging
//
// 3. What is with_graceful_shutdown?
//    - Stops accepting new connections when the future completes (Ctrl-C)
//    - In-flight requests are allowed to finish
// -----------------------------------------------------------------------------
