//! Startup checks for the external audio player

use tokio::process::Command;
use tracing::info;

/// Check that the configured player executable can be launched
pub async fn check_player_available(program: &str) -> Result<(), String> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("{} is not available ({}). Ambient audio will fail to play.", program, e))?;

    info!("{} is available", program);
    Ok(())
}
