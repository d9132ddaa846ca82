//! External process and network plumbing for ambient playback
//!
//! This module contains the command-line player device, source probing and
//! the startup availability check.

pub mod player;
pub mod probe;
pub mod system;

// Re-export main types
pub use player::{CommandDevice, PlayerCommand};
pub use probe::probe_source;
pub use system::check_player_available;
