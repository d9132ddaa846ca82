//! Session controller and ambient audio player
//!
//! The controller drives the countdown and issues playback commands through
//! the `Playable` capability; finished focus intervals go to a `SessionSink`.

pub mod audio;
pub mod log;
pub mod session;

pub use audio::{AudioPlayer, DeviceError, DeviceEvent, PlaybackDevice};
pub use log::SessionLog;
pub use session::{CompletedInterval, SessionController, TimerSettings};

use crate::state::FocusSessionRecord;

/// Something the controller can start and stop alongside the timer
pub trait Playable {
    fn resume(&mut self);
    fn pause(&mut self);
}

/// Receiver of completed focus sessions
pub trait SessionSink {
    fn on_session_complete(&mut self, record: FocusSessionRecord);
}

impl SessionSink for Vec<FocusSessionRecord> {
    fn on_session_complete(&mut self, record: FocusSessionRecord) {
        self.push(record);
    }
}
