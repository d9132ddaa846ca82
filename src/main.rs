//! Focus Session - a headless focus timer with ambient audio
//!
//! This is the main entry point for the focus-session service.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::{info, warn};

use focus_session::{
    api::create_router,
    config::Config,
    services::{check_player_available, probe::probe_client, CommandDevice},
    state::AppState,
    tasks::{countdown_task, device_events_task, success_notice_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_session={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-session v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, break={}min",
          config.host, config.port, config.focus_minutes, config.break_minutes);

    let catalog = config.track_catalog()?;
    info!("Loaded {} ambient tracks", catalog.tracks().len());

    // Audio failures never stop the timer, so a missing player is only a warning
    if let Err(e) = check_player_available(&config.player).await {
        warn!("{}", e);
    }

    let client = probe_client().map_err(anyhow::Error::msg)?;
    let (device_tx, device_rx) = mpsc::unbounded_channel();
    let device = CommandDevice::new(config.player_command(), client, device_tx);

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_settings(),
        catalog,
        Box::new(device),
    ));

    // Start the background tasks
    tokio::spawn(countdown_task(Arc::clone(&state)));
    tokio::spawn(device_events_task(Arc::clone(&state), device_rx));
    tokio::spawn(success_notice_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer           - Current session");
    info!("  POST /timer/start     - Start the countdown");
    info!("  POST /timer/pause     - Pause the countdown");
    info!("  POST /timer/reset     - Rewind the current interval");
    info!("  POST /timer/complete  - Finish the current interval now");
    info!("  POST /timer/duration  - Set the focus duration");
    info!("  POST /audio/track     - Select an ambient track");
    info!("  POST /audio/mute      - Toggle ambient audio");
    info!("  GET  /sessions        - Logged focus sessions");
    info!("  GET  /status          - Status with server metadata");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.teardown() {
        tracing::error!("Failed to tear down session: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
