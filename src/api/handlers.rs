//! HTTP endpoint handlers

use std::{num::NonZeroU32, sync::Arc};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, SessionSnapshot, TimerMode};
use super::responses::{
    AudioResponse, CompleteResponse, DurationRequest, HealthResponse, PresetsResponse,
    SessionsQuery, SessionsResponse, StatusResponse, TimerResponse, TrackRequest,
    TracksResponse, DURATION_PRESETS,
};

const DEFAULT_SESSION_LIMIT: usize = 50;

fn timer_reply(
    action: &str,
    message: &str,
    result: Result<SessionSnapshot, String>,
) -> Result<Json<TimerResponse>, StatusCode> {
    match result {
        Ok(session) => {
            info!("{} endpoint called - {}", action, message);
            Ok(Json(TimerResponse::new(message.to_string(), session)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer - Current session snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    match state.snapshot() {
        Ok(session) => Ok(Json(TimerResponse::new("Current session".to_string(), session))),
        Err(e) => {
            error!("Failed to read session: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start - Start counting down
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("start", "Timer started", state.start())
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("pause", "Timer paused", state.pause())
}

/// Handle POST /timer/reset - Rewind the current interval
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("reset", "Timer reset", state.reset())
}

/// Handle POST /timer/complete - Finish the current interval now
pub async fn complete_handler(State(state): State<Arc<AppState>>) -> Result<Json<CompleteResponse>, StatusCode> {
    match state.complete() {
        Ok((done, session)) => {
            let message = match done.finished {
                TimerMode::Focus => "Focus session logged, take a break",
                TimerMode::Break => "Break finished",
            };
            info!("Complete endpoint called - {} finished manually", done.finished);
            Ok(Json(CompleteResponse {
                message: message.to_string(),
                timestamp: chrono::Utc::now(),
                finished: done.finished,
                next: done.next,
                record: done.record,
                session,
            }))
        }
        Err(e) => {
            error!("Failed to complete interval: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/duration - Start a fresh focus interval of the given length
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<TimerResponse>, StatusCode> {
    let Some(minutes) = NonZeroU32::new(request.minutes) else {
        warn!("Rejected zero-minute duration");
        return Err(StatusCode::BAD_REQUEST);
    };

    let message = format!("Focus duration set to {} minutes", minutes);
    timer_reply("duration", &message, state.set_duration(minutes))
}

/// Handle GET /timer/presets - Offered focus durations
pub async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: DURATION_PRESETS.to_vec(),
    })
}

/// Handle GET /audio - Current audio state
pub async fn audio_handler(State(state): State<Arc<AppState>>) -> Result<Json<AudioResponse>, StatusCode> {
    match state.audio_state() {
        Ok(audio) => Ok(Json(AudioResponse::new("Current audio".to_string(), audio))),
        Err(e) => {
            error!("Failed to read audio state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /audio/tracks - Ambient track catalog
pub async fn tracks_handler(State(state): State<Arc<AppState>>) -> Json<TracksResponse> {
    Json(TracksResponse {
        tracks: state.catalog.tracks().to_vec(),
    })
}

/// Handle POST /audio/track - Select an ambient track
pub async fn track_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrackRequest>,
) -> Result<Json<AudioResponse>, StatusCode> {
    let Some(track) = state.catalog.get(&request.track_id).cloned() else {
        warn!("Unknown track requested: {}", request.track_id);
        return Err(StatusCode::NOT_FOUND);
    };

    let message = format!("Selected {}", track.label);
    match state.select_track(track) {
        Ok(audio) => {
            info!("Track endpoint called - {}", message);
            Ok(Json(AudioResponse::new(message, audio)))
        }
        Err(e) => {
            error!("Failed to select track: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /audio/mute - Toggle ambient audio mute
pub async fn mute_handler(State(state): State<Arc<AppState>>) -> Result<Json<AudioResponse>, StatusCode> {
    match state.toggle_mute() {
        Ok(audio) => {
            let message = if audio.muted { "Ambient audio muted" } else { "Ambient audio unmuted" };
            info!("Mute endpoint called - {}", message);
            Ok(Json(AudioResponse::new(message.to_string(), audio)))
        }
        Err(e) => {
            error!("Failed to toggle mute: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /sessions - Logged focus sessions
pub async fn sessions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionsQuery>,
) -> Result<Json<SessionsResponse>, StatusCode> {
    let limit = query.limit.unwrap_or(DEFAULT_SESSION_LIMIT);
    match state.sessions(limit) {
        Ok((sessions, count, total_minutes)) => Ok(Json(SessionsResponse {
            sessions,
            count,
            total_minutes,
        })),
        Err(e) => {
            error!("Failed to read sessions: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current status with server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
