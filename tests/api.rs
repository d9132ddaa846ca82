use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use focus_session::{
    catalog::{AmbientTrack, TrackCatalog},
    controller::{DeviceError, DeviceEvent, PlaybackDevice, TimerSettings},
    create_router, AppState,
};

/// Records every device command so tests can assert on playback
#[derive(Clone, Default)]
struct RecordingDevice {
    calls: Arc<Mutex<Vec<String>>>,
    last_load: Arc<Mutex<Option<(String, u64)>>>,
}

impl RecordingDevice {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Acquisition result for the most recent load
    fn ready(&self) -> DeviceEvent {
        let (track_id, load_id) = self.last_load.lock().unwrap().clone().unwrap();
        DeviceEvent::Ready { track_id, load_id }
    }

    fn failed(&self, detail: &str) -> DeviceEvent {
        let (track_id, load_id) = self.last_load.lock().unwrap().clone().unwrap();
        DeviceEvent::Failed { track_id, load_id, detail: detail.to_string() }
    }
}

impl PlaybackDevice for RecordingDevice {
    fn load(&mut self, track: &AmbientTrack, load_id: u64) {
        self.calls.lock().unwrap().push(format!("load:{}", track.id));
        *self.last_load.lock().unwrap() = Some((track.id.clone(), load_id));
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        self.calls.lock().unwrap().push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push("pause".to_string());
    }

    fn release(&mut self) {
        self.calls.lock().unwrap().push("release".to_string());
    }
}

fn setup() -> (Arc<AppState>, Router, RecordingDevice) {
    let device = RecordingDevice::default();
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        TimerSettings::default(),
        TrackCatalog::default(),
        Box::new(device.clone()),
    ));
    let router = create_router(Arc::clone(&state));
    (state, router, device)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (_state, router, _device) = setup();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn timer_starts_idle_at_default_focus() {
    let (_state, router, _device) = setup();
    let (status, body) = send(&router, Method::GET, "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["session"]["timer"]["mode"], "focus");
    assert_eq!(body["session"]["timer"]["remaining_seconds"], 1500);
    assert_eq!(body["session"]["display"], "25:00");
    assert_eq!(body["session"]["audio"]["selected_track"]["id"], "none");
}

#[tokio::test]
async fn start_and_pause_round_trip() {
    let (state, router, _device) = setup();

    let (status, body) = send(&router, Method::POST, "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    state.tick(1).unwrap();

    let (_, body) = send(&router, Method::POST, "/timer/pause", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["session"]["timer"]["remaining_seconds"], 1499);

    let (_, body) = send(&router, Method::POST, "/timer/reset", None).await;
    assert_eq!(body["session"]["timer"]["remaining_seconds"], 1500);
}

#[tokio::test]
async fn duration_rejects_zero_and_accepts_presets() {
    let (_state, router, _device) = setup();

    let (status, _) = send(&router, Method::POST, "/timer/duration", Some(json!({ "minutes": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&router, Method::POST, "/timer/duration", Some(json!({ "minutes": 60 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["timer"]["total_seconds"], 3600);
    assert_eq!(body["session"]["display"], "60:00");

    let (_, body) = send(&router, Method::GET, "/timer/presets", None).await;
    assert_eq!(body["presets"], json!([15, 25, 60]));
}

#[tokio::test]
async fn manual_complete_logs_focus_session() {
    let (_state, router, _device) = setup();
    send(&router, Method::POST, "/timer/duration", Some(json!({ "minutes": 15 }))).await;

    let (status, body) = send(&router, Method::POST, "/timer/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finished"], "focus");
    assert_eq!(body["next"], "break");
    assert_eq!(body["record"]["duration_minutes"], 15);
    assert_eq!(body["record"]["label"], "Focus Session");
    assert_eq!(body["session"]["success_visible"], true);
    assert_eq!(body["session"]["timer"]["remaining_seconds"], 300);

    let (_, body) = send(&router, Method::POST, "/timer/complete", None).await;
    assert_eq!(body["finished"], "break");
    assert!(body["record"].is_null());
    assert_eq!(body["session"]["timer"]["total_seconds"], 900);

    let (_, body) = send(&router, Method::GET, "/sessions", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["total_minutes"], 15);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_track_is_not_found() {
    let (_state, router, _device) = setup();
    let (status, _) = send(&router, Method::POST, "/audio/track", Some(json!({ "track_id": "ocean" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn track_plays_once_ready_while_running() {
    let (state, router, device) = setup();

    send(&router, Method::POST, "/timer/start", None).await;
    let (status, body) = send(&router, Method::POST, "/audio/track", Some(json!({ "track_id": "rain" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["audio"]["loading"], true);

    state.handle_device_event(device.ready()).unwrap();
    assert_eq!(device.calls(), vec!["load:rain", "play"]);

    let (_, body) = send(&router, Method::POST, "/audio/mute", None).await;
    assert_eq!(body["audio"]["muted"], true);
    assert_eq!(device.calls().last().map(String::as_str), Some("pause"));

    send(&router, Method::POST, "/audio/mute", None).await;
    assert_eq!(device.calls().last().map(String::as_str), Some("play"));

    send(&router, Method::POST, "/timer/pause", None).await;
    assert_eq!(device.calls().last().map(String::as_str), Some("pause"));
}

#[tokio::test]
async fn load_failure_is_reported_without_touching_timer() {
    let (state, router, device) = setup();

    send(&router, Method::POST, "/timer/start", None).await;
    send(&router, Method::POST, "/audio/track", Some(json!({ "track_id": "wind" }))).await;
    state.handle_device_event(device.failed("server returned 404")).unwrap();

    let (_, body) = send(&router, Method::GET, "/audio", None).await;
    assert_eq!(body["audio"]["loading"], false);
    assert_eq!(body["audio"]["last_error"], "failed to load track");

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["session"]["timer"]["running"], true);
    assert_eq!(body["last_action"], "track");
}

#[tokio::test]
async fn catalog_lists_silence_first() {
    let (_state, router, _device) = setup();
    let (_, body) = send(&router, Method::GET, "/audio/tracks", None).await;
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 4);
    assert_eq!(tracks[0]["id"], "none");
    assert_eq!(tracks[0]["source"], "");
}
