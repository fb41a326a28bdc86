//! Router setup with API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use daybook_core::{DaybookConfig, DaybookError};

use crate::handlers;
use crate::state::AppState;

/// Request body limit for all routes.
pub const BODY_LIMIT_BYTES: usize = 16 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on 127.0.0.1 at the configured port until the process exits.
pub async fn start_server(config: &DaybookConfig, state: AppState) -> Result<(), DaybookError> {
    let addr = format!("127.0.0.1:{}", config.general.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting API server on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
