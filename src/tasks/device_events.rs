//! Forwarding of playback device events to the audio player

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{controller::DeviceEvent, state::AppState};

/// Background task that applies source acquisition results as they arrive
pub async fn device_events_task(state: Arc<AppState>, mut events: mpsc::UnboundedReceiver<DeviceEvent>) {
    info!("Starting device event task");

    while let Some(event) = events.recv().await {
        debug!("Device event: {:?}", event);
        if let Err(e) = state.handle_device_event(event) {
            error!("Failed to apply device event: {}", e);
        }
    }

    info!("Device event channel closed");
}
