//! HTTP API surface

pub mod handlers;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_request_body_size;

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/webhook/gohighlevel",
            post(handlers::webhook::gohighlevel_webhook),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
