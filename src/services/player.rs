//! Playback device backed by an external command-line player

use std::process::Stdio;

use reqwest::Client;
use tokio::{
    process::{Child, Command},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::probe::probe_source;
use crate::{
    catalog::AmbientTrack,
    controller::{DeviceError, DeviceEvent, PlaybackDevice},
};

/// Program and arguments used to play a source; the source is appended last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for PlayerCommand {
    fn default() -> Self {
        Self {
            program: "mpv".to_string(),
            args: vec![
                "--no-video".to_string(),
                "--loop=inf".to_string(),
                "--really-quiet".to_string(),
            ],
        }
    }
}

/// Plays the loaded source by spawning the player command; pausing kills it.
///
/// Acquisition runs as a spawned probe task whose result goes to `events`.
/// Must be used from within a tokio runtime.
pub struct CommandDevice {
    command: PlayerCommand,
    client: Client,
    events: mpsc::UnboundedSender<DeviceEvent>,
    source: Option<String>,
    probe: Option<JoinHandle<()>>,
    child: Option<Child>,
}

impl CommandDevice {
    pub fn new(
        command: PlayerCommand,
        client: Client,
        events: mpsc::UnboundedSender<DeviceEvent>,
    ) -> Self {
        Self {
            command,
            client,
            events,
            source: None,
            probe: None,
            child: None,
        }
    }

    fn probe_pending(&self) -> bool {
        self.probe.as_ref().is_some_and(|probe| !probe.is_finished())
    }

    fn stop_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!("Player process already gone: {}", e);
            }
        }
    }
}

impl PlaybackDevice for CommandDevice {
    fn load(&mut self, track: &AmbientTrack, load_id: u64) {
        self.release();

        let client = self.client.clone();
        let events = self.events.clone();
        let track_id = track.id.clone();
        let source = track.source.clone();
        self.source = Some(source.clone());

        self.probe = Some(tokio::spawn(async move {
            let event = match probe_source(&client, &source).await {
                Ok(()) => DeviceEvent::Ready { track_id, load_id },
                Err(detail) => DeviceEvent::Failed { track_id, load_id, detail },
            };
            if events.send(event).is_err() {
                debug!("Device event receiver dropped");
            }
        }));
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if self.probe_pending() {
            return Err(DeviceError::Interrupted);
        }
        let Some(source) = self.source.as_deref() else {
            return Err(DeviceError::Unsupported("no source loaded".to_string()));
        };

        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(None) => return Ok(()),
                Ok(Some(status)) => debug!("Previous player exited with {}", status),
                Err(e) => warn!("Failed to poll player process: {}", e),
            }
        }

        let child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DeviceError::Unsupported(format!("failed to start {}: {}", self.command.program, e))
            })?;

        info!("Started {} for {}", self.command.program, source);
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) {
        self.stop_child();
    }

    fn release(&mut self) {
        if let Some(probe) = self.probe.take() {
            probe.abort();
        }
        self.stop_child();
        self.source = None;
    }
}

impl Drop for CommandDevice {
    fn drop(&mut self) {
        self.release();
    }
}
