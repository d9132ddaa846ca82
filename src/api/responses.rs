//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::AmbientTrack,
    state::{AudioState, FocusSessionRecord, SessionSnapshot, TimerMode},
};

/// Focus durations offered to clients, in minutes
pub const DURATION_PRESETS: [u32; 3] = [15, 25, 60];

/// Response for timer operations
#[derive(Debug, Clone, Serialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl TimerResponse {
    /// Create a timer response; status follows the running flag
    pub fn new(message: String, session: SessionSnapshot) -> Self {
        let status = if session.timer.running { "running" } else { "idle" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            session,
        }
    }
}

/// Response for a completion transition
#[derive(Debug, Clone, Serialize)]
pub struct CompleteResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub finished: TimerMode,
    pub next: TimerMode,
    pub record: Option<FocusSessionRecord>,
    pub session: SessionSnapshot,
}

/// Response for audio operations
#[derive(Debug, Clone, Serialize)]
pub struct AudioResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub audio: AudioState,
}

impl AudioResponse {
    pub fn new(message: String, audio: AudioState) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
            audio,
        }
    }
}

/// Full status with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Logged focus sessions, newest first
#[derive(Debug, Clone, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<FocusSessionRecord>,
    pub count: usize,
    pub total_minutes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<AmbientTrack>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<u32>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    pub minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackRequest {
    pub track_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsQuery {
    pub limit: Option<usize>,
}
