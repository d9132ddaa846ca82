//! Ambient audio state structure

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::catalog::AmbientTrack;

/// User-visible audio failures. They are recorded, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// The selected source could not be buffered
    #[error("failed to load track")]
    Load { detail: String },
    /// The device refused to start playback
    #[error("playback blocked or unsupported")]
    Playback { detail: String },
}

impl Serialize for AudioError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Audio state visible to clients
#[derive(Debug, Clone, Serialize)]
pub struct AudioState {
    pub selected_track: AmbientTrack,
    pub muted: bool,
    pub loading: bool,
    pub last_error: Option<AudioError>,
}

impl AudioState {
    /// Initial state with the given (silent) track selected
    pub fn new(selected_track: AmbientTrack) -> Self {
        Self {
            selected_track,
            muted: false,
            loading: false,
            last_error: None,
        }
    }
}
