//! Focus Session - a headless focus timer with ambient audio
//! 
//! This library provides the focus/break session controller, the ambient
//! audio player that follows it, and an HTTP surface for driving both.

pub mod api;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use api::create_router;
pub use catalog::{AmbientTrack, TrackCatalog};
pub use config::Config;
pub use controller::{AudioPlayer, SessionController, SessionLog, TimerSettings};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
