//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/:mode/start", post(start_handler))
        .route("/timer/:mode/pause", post(pause_handler))
        .route("/timer/:mode/reset", post(reset_handler))
        .route("/timer/:mode/press", post(press_handler))
        .route("/mode/:mode", post(select_mode_handler))
        .route("/settings", get(get_settings_handler).put(put_settings_handler))
        .route("/stats", get(stats_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
