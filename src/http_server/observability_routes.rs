//! Observability HTTP Routes
//!
//! Health check and counters for the suggestion service.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::suggest_routes::SuggestState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Generation currently served; 0 until the first reload succeeds
    pub generation: u64,
    pub keys: usize,
    pub entries: usize,
    /// RFC 3339 install time of the served generation
    pub loaded_at: String,
}

/// Create observability routes
pub fn observability_routes(state: Arc<SuggestState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check route (also available at root /health)
pub fn health_routes(state: Arc<SuggestState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<SuggestState>>) -> impl IntoResponse {
    let generation = state.store.current();
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation: generation.number(),
        keys: generation.index().key_count(),
        entries: generation.index().entry_count(),
        loaded_at: generation.loaded_at().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(state): State<Arc<SuggestState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}
