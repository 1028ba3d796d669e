// LogLens - app/server.rs
//
// Router assembly and the listening loop.

use crate::app::handlers;
use crate::app::state::AppState;
use crate::util::error::LogLensError;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the service router over `state`.
///
/// axum's own 2 MiB body cap is replaced by the configured upload limit so
/// oversized requests are rejected with 413 before any parsing happens.
pub fn router(state: AppState) -> Router {
    let limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(handlers::handle_health))
        .route("/categories", get(handlers::handle_categories))
        .route("/upload", post(handlers::handle_upload))
        .route("/filter", post(handlers::handle_filter))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C (or SIGTERM on Unix).
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), LogLensError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| LogLensError::Server {
            addr: addr.to_string(),
            source: e,
        })?;

    tracing::info!(
        addr = %addr,
        mode = %state.mode(),
        max_upload_bytes = state.max_upload_bytes,
        "Listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LogLensError::Server {
            addr: addr.to_string(),
            source: e,
        })?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Could not install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
