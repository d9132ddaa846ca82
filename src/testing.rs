//! Shared fixtures for unit tests

use crate::{
    catalog::{AmbientTrack, TrackCatalog},
    controller::{DeviceError, PlaybackDevice, TimerSettings},
    state::AppState,
};

/// Device that accepts every command and never reports events
pub struct NullDevice;

impl PlaybackDevice for NullDevice {
    fn load(&mut self, _track: &AmbientTrack, _load_id: u64) {}

    fn play(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn release(&mut self) {}
}

/// Id of the player's most recent load request
pub fn current_load(state: &AppState) -> u64 {
    state.controller.lock().unwrap().playable().load_id()
}

pub fn app_state() -> AppState {
    AppState::new(
        0,
        "127.0.0.1".to_string(),
        TimerSettings::default(),
        TrackCatalog::default(),
        Box::new(NullDevice),
    )
}
