//! Timed clearing of the "session complete" notice

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::error::RecvError,
    time::{sleep_until, Instant},
};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// How long the success notice stays visible after a focus completion
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Background task that hides each success notice once its window has passed.
///
/// A newer notice replaces the pending one and restarts the window.
pub async fn success_notice_task(state: Arc<AppState>) {
    info!("Starting success notice task");

    let mut notices = state.success_tx.subscribe();
    let mut pending: Option<(u64, Instant)> = None;

    loop {
        let deadline = pending.map(|(_, at)| at);

        tokio::select! {
            received = notices.recv() => match received {
                Ok(generation) => {
                    debug!("Success notice {} raised", generation);
                    pending = Some((generation, Instant::now() + SUCCESS_NOTICE_DURATION));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} success notices", skipped);
                }
                Err(RecvError::Closed) => break,
            },

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some((generation, _)) = pending.take() {
                    match state.clear_success(generation) {
                        Ok(true) => debug!("Success notice {} cleared", generation),
                        Ok(false) => debug!("Success notice {} was superseded", generation),
                        Err(e) => error!("Failed to clear success notice: {}", e),
                    }
                }
            }
        }
    }

    info!("Success notice task stopped");
}
