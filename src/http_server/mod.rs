//! # suggestd HTTP Server Module
//!
//! Axum shell around the suggestion index.
//!
//! # Endpoints
//!
//! - `POST /v1/api/suggest` - Ranked suggestions for `{"input": <key>}`
//! - `/health` - Health check with the served generation
//! - `/observability/*` - Health and counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod suggest_routes;

pub use config::HttpServerConfig;
pub use errors::{SuggestError, SuggestResult};
pub use server::HttpServer;
pub use suggest_routes::{guarded_json, SuggestState, Suggestion};
