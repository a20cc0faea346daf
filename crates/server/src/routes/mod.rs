//! API route handlers
//!
//! - `health`: Liveness, readiness, and metrics
//! - `products`: Product listing and single-product CRUD

pub mod health;
pub mod products;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

/// Landing page (GET /)
///
/// Serves the configured `index.html`. A missing page is a plain 404.
pub async fn index_page(State(state): State<Arc<ServerState>>) -> ServerResult<Html<String>> {
    match tokio::fs::read_to_string(&state.config.index_html).await {
        Ok(body) => Ok(Html(body)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %state.config.index_html.display(), "index page missing");
            Err(ServerError::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
