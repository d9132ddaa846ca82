//! State management module
//! 
//! This module contains the timer, audio and session data structures and the
//! shared application state that composes them.

pub mod app_state;
pub mod audio_state;
pub mod session_record;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, Controller, RunSignal};
pub use audio_state::{AudioError, AudioState};
pub use session_record::FocusSessionRecord;
pub use snapshot::SessionSnapshot;
pub use timer_state::{TimerMode, TimerState};
