use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Launch surfaces
        .route("/capture/shortcut", post(handlers::shortcut_launch))
        .route("/capture/quick-tile", post(handlers::quick_tile_launch))
        // Overlay callbacks
        .route("/capture/confirm", post(handlers::confirm_capture))
        .route("/capture/stop", post(handlers::stop_capture))
        // Session queries
        .route("/capture/status", get(handlers::capture_status))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
