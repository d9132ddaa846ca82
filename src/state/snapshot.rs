//! Read model of the whole focus session

use serde::Serialize;

use super::{AudioState, Controller, TimerState};

/// Point-in-time view of timer and audio, as served to clients
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub timer: TimerState,
    pub progress: f64,
    pub display: String,
    pub success_visible: bool,
    pub audio: AudioState,
}

impl SessionSnapshot {
    pub fn capture(controller: &Controller) -> Self {
        let timer = controller.state().clone();
        Self {
            progress: timer.progress_ratio(),
            display: timer.display(),
            success_visible: controller.success_visible(),
            audio: controller.playable().state().clone(),
            timer,
        }
    }
}
