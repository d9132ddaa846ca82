//! Main application state management

use std::{
    num::NonZeroU32,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{AudioState, FocusSessionRecord, SessionSnapshot};
use crate::{
    catalog::{AmbientTrack, TrackCatalog},
    controller::{
        AudioPlayer, CompletedInterval, DeviceEvent, PlaybackDevice, SessionController,
        SessionLog, TimerSettings,
    },
};

/// The controller as composed by the service
pub type Controller = SessionController<AudioPlayer, SessionLog>;

/// What the tick task needs to know about the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSignal {
    pub running: bool,
    pub epoch: u64,
}

impl RunSignal {
    fn of(controller: &Controller) -> Self {
        Self {
            running: controller.is_running(),
            epoch: controller.run_epoch(),
        }
    }
}

/// Main application state that owns the session controller
#[derive(Debug)]
pub struct AppState {
    /// Timer, audio player and session log; the single owner of session state
    pub controller: Arc<Mutex<Controller>>,
    /// Ambient tracks clients may select
    pub catalog: TrackCatalog,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Running flag and epoch for the tick task
    pub run_signal_tx: watch::Sender<RunSignal>,
    /// Keep the receiver alive to prevent channel closure
    pub _run_signal_rx: watch::Receiver<RunSignal>,
    /// Generations of newly raised success notices
    pub success_tx: broadcast::Sender<u64>,
}

impl AppState {
    /// Create a new AppState with an idle focus timer and silence selected
    pub fn new(
        port: u16,
        host: String,
        settings: TimerSettings,
        catalog: TrackCatalog,
        device: Box<dyn PlaybackDevice>,
    ) -> Self {
        let player = AudioPlayer::new(catalog.silence().clone(), device);
        let controller = SessionController::new(settings, player, SessionLog::new());
        let (run_signal_tx, run_signal_rx) = watch::channel(RunSignal::of(&controller));
        let (success_tx, _) = broadcast::channel(16);

        Self {
            controller: Arc::new(Mutex::new(controller)),
            catalog,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            run_signal_tx,
            _run_signal_rx: run_signal_rx,
            success_tx,
        }
    }

    /// Apply an operation to the controller and notify the background tasks.
    ///
    /// An empty `action` is not recorded as the last user action.
    pub fn update_controller<T, F>(&self, action: &str, updater: F) -> Result<T, String>
    where
        F: FnOnce(&mut Controller) -> T,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock session controller: {}", e))?;

        let generation_before = controller.success_generation();
        let result = updater(&mut *controller);
        let signal = RunSignal::of(&controller);
        let raised = controller.success_generation() != generation_before
            && controller.success_visible();
        let generation = controller.success_generation();
        drop(controller); // Release the lock early

        if !action.is_empty() {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        // Only wake the tick task when something it cares about changed
        self.run_signal_tx.send_if_modified(|current| {
            if *current == signal {
                return false;
            }
            *current = signal;
            true
        });

        if raised && self.success_tx.send(generation).is_err() {
            debug!("No success notice listener for generation {}", generation);
        }

        Ok(result)
    }

    pub fn start(&self) -> Result<SessionSnapshot, String> {
        self.update_controller("start", |c| {
            c.start();
            SessionSnapshot::capture(c)
        })
    }

    pub fn pause(&self) -> Result<SessionSnapshot, String> {
        self.update_controller("pause", |c| {
            c.pause();
            SessionSnapshot::capture(c)
        })
    }

    pub fn reset(&self) -> Result<SessionSnapshot, String> {
        self.update_controller("reset", |c| {
            c.reset();
            SessionSnapshot::capture(c)
        })
    }

    /// Manually finish the current interval
    pub fn complete(&self) -> Result<(CompletedInterval, SessionSnapshot), String> {
        self.update_controller("complete", |c| {
            let done = c.complete();
            (done, SessionSnapshot::capture(c))
        })
    }

    pub fn set_duration(&self, minutes: NonZeroU32) -> Result<SessionSnapshot, String> {
        self.update_controller("duration", |c| {
            c.set_duration(minutes);
            SessionSnapshot::capture(c)
        })
    }

    pub fn select_track(&self, track: AmbientTrack) -> Result<AudioState, String> {
        self.update_controller("track", |c| {
            let player = c.playable_mut();
            player.select_track(track);
            player.state().clone()
        })
    }

    pub fn toggle_mute(&self) -> Result<AudioState, String> {
        self.update_controller("mute", |c| {
            let running = c.is_running();
            let player = c.playable_mut();
            player.toggle_mute(running);
            player.state().clone()
        })
    }

    /// Advance the countdown for the running stretch `epoch`.
    ///
    /// Returns false once that stretch is over and the caller should stop
    /// ticking.
    pub fn tick(&self, epoch: u64) -> Result<bool, String> {
        self.update_controller("", |c| {
            if !c.is_running() || c.run_epoch() != epoch {
                debug!("Dropping stale tick for epoch {}", epoch);
                return false;
            }
            match c.tick() {
                Some(done) => {
                    info!("{} interval expired, next: {}", done.finished, done.next);
                    false
                }
                None => true,
            }
        })
    }

    /// Apply a source acquisition result from the playback device
    pub fn handle_device_event(&self, event: DeviceEvent) -> Result<AudioState, String> {
        self.update_controller("", |c| {
            let running = c.is_running();
            let player = c.playable_mut();
            match event {
                DeviceEvent::Ready { track_id, load_id } => {
                    player.on_source_ready(&track_id, load_id, running)
                }
                DeviceEvent::Failed { track_id, load_id, detail } => {
                    player.on_source_error(&track_id, load_id, &detail)
                }
            }
            player.state().clone()
        })
    }

    /// Hide the success notice raised by completion `generation`
    pub fn clear_success(&self, generation: u64) -> Result<bool, String> {
        self.update_controller("", |c| c.clear_success(generation))
    }

    /// Stop the timer and release the playback device
    pub fn teardown(&self) -> Result<(), String> {
        self.update_controller("", |c| {
            c.pause();
            c.playable_mut().shutdown();
        })?;
        info!("Session controller torn down");
        Ok(())
    }

    /// Get the current session snapshot
    pub fn snapshot(&self) -> Result<SessionSnapshot, String> {
        self.controller.lock()
            .map(|c| SessionSnapshot::capture(&c))
            .map_err(|e| format!("Failed to lock session controller: {}", e))
    }

    /// Get the current audio state
    pub fn audio_state(&self) -> Result<AudioState, String> {
        self.controller.lock()
            .map(|c| c.playable().state().clone())
            .map_err(|e| format!("Failed to lock session controller: {}", e))
    }

    /// Logged sessions (newest first, at most `limit`), their count and total minutes
    pub fn sessions(&self, limit: usize) -> Result<(Vec<FocusSessionRecord>, usize, u64), String> {
        let controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock session controller: {}", e))?;
        let log = controller.sink();
        Ok((log.recent(limit), log.len(), log.total_minutes()))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerMode;
    use crate::testing::{app_state, current_load};

    #[test]
    fn start_publishes_run_signal() {
        let state = app_state();
        let rx = state.run_signal_tx.subscribe();
        state.start().unwrap();
        assert_eq!(*rx.borrow(), RunSignal { running: true, epoch: 1 });

        state.pause().unwrap();
        assert_eq!(*rx.borrow(), RunSignal { running: false, epoch: 1 });
        assert_eq!(state.get_last_action().0.as_deref(), Some("pause"));
    }

    #[test]
    fn stale_epoch_tick_is_dropped() {
        let state = app_state();
        state.start().unwrap();
        state.pause().unwrap();
        state.start().unwrap();

        assert!(!state.tick(1).unwrap());
        assert_eq!(state.snapshot().unwrap().timer.remaining_seconds, 1500);
        assert!(state.tick(2).unwrap());
        assert_eq!(state.snapshot().unwrap().timer.remaining_seconds, 1499);
    }

    #[test]
    fn focus_completion_raises_success_notice() {
        let state = app_state();
        let mut rx = state.success_tx.subscribe();

        let (done, snapshot) = state.complete().unwrap();
        assert_eq!(done.finished, TimerMode::Focus);
        assert!(snapshot.success_visible);
        let generation = rx.try_recv().unwrap();

        let (done, _) = state.complete().unwrap();
        assert_eq!(done.finished, TimerMode::Break);
        assert!(rx.try_recv().is_err());

        assert!(state.clear_success(generation).unwrap());
        assert!(!state.snapshot().unwrap().success_visible);
    }

    #[test]
    fn device_events_reach_the_player() {
        let state = app_state();
        let rain = state.catalog.get("rain").unwrap().clone();
        assert!(state.select_track(rain).unwrap().loading);

        let audio = state
            .handle_device_event(DeviceEvent::Failed {
                track_id: "rain".to_string(),
                load_id: current_load(&state),
                detail: "timeout".to_string(),
            })
            .unwrap();
        assert!(!audio.loading);
        assert!(audio.last_error.is_some());
    }

    #[test]
    fn result_of_replaced_load_is_ignored() {
        let state = app_state();
        state.start().unwrap();
        let rain = state.catalog.get("rain").unwrap().clone();

        state.select_track(rain.clone()).unwrap();
        let first = current_load(&state);
        state.select_track(rain).unwrap();
        let second = current_load(&state);

        let audio = state
            .handle_device_event(DeviceEvent::Ready { track_id: "rain".to_string(), load_id: first })
            .unwrap();
        assert!(audio.loading);

        let audio = state
            .handle_device_event(DeviceEvent::Ready { track_id: "rain".to_string(), load_id: second })
            .unwrap();
        assert!(!audio.loading);
        assert!(state.controller.lock().unwrap().playable().is_playing());
    }

    #[test]
    fn sessions_are_listed_newest_first() {
        let state = app_state();
        state.set_duration(NonZeroU32::new(15).unwrap()).unwrap();
        state.complete().unwrap();
        state.complete().unwrap();
        state.complete().unwrap();

        let (sessions, count, total) = state.sessions(10).unwrap();
        assert_eq!(count, 2);
        assert_eq!(total, 30);
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].timestamp >= sessions[1].timestamp);
    }
}
