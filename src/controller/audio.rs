//! Ambient audio player
//!
//! Keeps one playback device in step with the selected track, the mute flag
//! and the timer's running state. Failures are recorded in `AudioState` and
//! never reach the caller.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::Playable;
use crate::{
    catalog::AmbientTrack,
    state::{AudioError, AudioState},
};

/// Errors a device may report when asked to play
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// A newer request pre-empted this one
    #[error("playback interrupted by a newer request")]
    Interrupted,
    #[error("playback unsupported: {0}")]
    Unsupported(String),
}

/// Outcome of asynchronous source acquisition, tagged with the track and the
/// load request it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Ready { track_id: String, load_id: u64 },
    Failed { track_id: String, load_id: u64, detail: String },
}

/// An audio output that can load one source at a time.
///
/// `load` only begins acquisition; the result is reported later as a
/// `DeviceEvent` carrying the same track id and `load_id`.
pub trait PlaybackDevice: Send {
    fn load(&mut self, track: &AmbientTrack, load_id: u64);
    fn play(&mut self) -> Result<(), DeviceError>;
    fn pause(&mut self);
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceSlot {
    Idle,
    Loading,
    Ready { playing: bool },
}

pub struct AudioPlayer {
    state: AudioState,
    slot: DeviceSlot,
    /// Bumped on every selection so results of earlier loads never match
    load_id: u64,
    device: Box<dyn PlaybackDevice>,
}

impl std::fmt::Debug for AudioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("state", &self.state)
            .field("slot", &self.slot)
            .field("load_id", &self.load_id)
            .finish_non_exhaustive()
    }
}

impl AudioPlayer {
    /// Create a player with `initial` selected. Pass the silence track to
    /// start without engaging the device.
    pub fn new(initial: AmbientTrack, device: Box<dyn PlaybackDevice>) -> Self {
        let mut player = Self {
            state: AudioState::new(initial.clone()),
            slot: DeviceSlot::Idle,
            load_id: 0,
            device,
        };
        player.select_track(initial);
        player
    }

    pub fn state(&self) -> &AudioState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.slot, DeviceSlot::Ready { playing: true })
    }

    /// Id of the most recent load request
    pub fn load_id(&self) -> u64 {
        self.load_id
    }

    /// Swap the selected track, dropping whatever the device had loaded
    pub fn select_track(&mut self, track: AmbientTrack) {
        if self.slot != DeviceSlot::Idle {
            self.device.release();
        }
        self.state.last_error = None;
        self.load_id += 1;

        if track.is_silent() {
            info!("Ambient track set to {} (silent)", track.id);
            self.slot = DeviceSlot::Idle;
            self.state.loading = false;
        } else {
            info!("Loading ambient track {} from {}", track.id, track.source);
            self.slot = DeviceSlot::Loading;
            self.state.loading = true;
            self.device.load(&track, self.load_id);
        }
        self.state.selected_track = track;
    }

    /// The device buffered `track_id` for request `load_id`; start playing if
    /// the timer is running
    pub fn on_source_ready(&mut self, track_id: &str, load_id: u64, timer_running: bool) {
        if !self.is_pending(track_id, load_id) {
            debug!("Discarding stale ready event for track {} (load {})", track_id, load_id);
            return;
        }

        info!("Ambient track {} ready", track_id);
        self.state.loading = false;
        self.slot = DeviceSlot::Ready { playing: false };
        if timer_running && !self.state.muted {
            self.resume();
        }
    }

    /// The device could not acquire `track_id`. No retry is attempted.
    pub fn on_source_error(&mut self, track_id: &str, load_id: u64, detail: &str) {
        if !self.is_pending(track_id, load_id) {
            debug!("Discarding stale error for track {} (load {}): {}", track_id, load_id, detail);
            return;
        }

        warn!("Failed to load ambient track {}: {}", track_id, detail);
        self.device.release();
        self.slot = DeviceSlot::Idle;
        self.state.loading = false;
        self.state.last_error = Some(AudioError::Load {
            detail: detail.to_string(),
        });
    }

    /// Flip the mute flag, resuming only when unmuted while the timer runs
    pub fn toggle_mute(&mut self, timer_running: bool) {
        self.state.muted = !self.state.muted;
        info!("Ambient audio muted: {}", self.state.muted);
        if !self.state.muted && timer_running {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Release the device for shutdown
    pub fn shutdown(&mut self) {
        if self.slot != DeviceSlot::Idle {
            self.device.release();
        }
        self.slot = DeviceSlot::Idle;
    }

    fn is_pending(&self, track_id: &str, load_id: u64) -> bool {
        self.slot == DeviceSlot::Loading
            && self.load_id == load_id
            && self.state.selected_track.id == track_id
    }
}

impl Playable for AudioPlayer {
    fn resume(&mut self) {
        if self.state.selected_track.is_silent() || self.state.muted {
            return;
        }
        if self.slot != (DeviceSlot::Ready { playing: false }) {
            return;
        }

        self.state.last_error = None;
        match self.device.play() {
            Ok(()) => {
                debug!("Playing ambient track {}", self.state.selected_track.id);
                self.slot = DeviceSlot::Ready { playing: true };
            }
            Err(DeviceError::Interrupted) => {
                debug!("Playback request interrupted, ignoring");
            }
            Err(DeviceError::Unsupported(detail)) => {
                warn!("Ambient playback failed: {}", detail);
                self.state.last_error = Some(AudioError::Playback { detail });
            }
        }
    }

    fn pause(&mut self) {
        if let DeviceSlot::Ready { playing: true } = self.slot {
            self.device.pause();
            self.slot = DeviceSlot::Ready { playing: false };
        }
    }
}
