//! One-second tick source for the session countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the controller once per second while it runs.
///
/// Each running stretch gets its own interval, dropped as soon as the run
/// signal changes, so no tick from an old stretch reaches the controller.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut signal_rx = state.run_signal_tx.subscribe();

    loop {
        let signal = *signal_rx.borrow_and_update();
        if !signal.running {
            // Wait for the next start
            if signal_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Countdown running for epoch {}", signal.epoch);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick(signal.epoch) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => {
                            error!("Failed to advance countdown: {}", e);
                            return;
                        }
                    }
                }

                changed = signal_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    debug!("Run signal changed, cancelling countdown for epoch {}", signal.epoch);
                    break;
                }
            }
        }
    }

    info!("Countdown task stopped");
}
