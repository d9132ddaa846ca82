//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod device_events;
pub mod success_notice;

// Re-export main functions
pub use countdown::countdown_task;
pub use device_events::device_events_task;
pub use success_notice::{success_notice_task, SUCCESS_NOTICE_DURATION};
