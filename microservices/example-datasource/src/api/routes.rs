//! Router configuration for the Example Datasource API

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        // Datasource
        .route("/metadata", get(handlers::get_metadata))
        .route("/data", get(handlers::get_data))
        .route("/size", get(handlers::get_size))
        .with_state(state)
}
