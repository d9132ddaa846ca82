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
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/complete", post(complete_handler))
        .route("/timer/duration", post(duration_handler))
        .route("/timer/presets", get(presets_handler))
        .route("/audio", get(audio_handler))
        .route("/audio/tracks", get(tracks_handler))
        .route("/audio/track", post(track_handler))
        .route("/audio/mute", post(mute_handler))
        .route("/sessions", get(sessions_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
