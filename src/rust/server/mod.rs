//! HTTP surface of the service.
//!
//! The router is built around an explicitly constructed [`Classifier`], so
//! tests can mount it with any [`Predictor`](crate::Predictor) behind it.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::classifier::Classifier;

mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::PredictResponse;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self { classifier }
    }
}

/// Builds the application router.
///
/// Request bodies are buffered in full; `max_body_bytes` caps them, and
/// `None` leaves them unbounded.
pub fn router(state: AppState, max_body_bytes: Option<usize>) -> Router {
    let body_limit = match max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .layer(body_limit)
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(
    state: AppState,
    addr: &str,
    max_body_bytes: Option<usize>,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state, max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
