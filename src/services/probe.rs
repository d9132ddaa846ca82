//! Source acquisition checks for ambient tracks

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client used for probing remote sources
pub fn probe_client() -> Result<Client, String> {
    Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Check that `source` can be played: remote URLs must answer a HEAD request
/// successfully, anything else must be an existing local file.
pub async fn probe_source(client: &Client, source: &str) -> Result<(), String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        debug!("Probing remote source {}", source);
        let response = client
            .head(source)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("server returned {}", response.status()));
        }
        return Ok(());
    }

    debug!("Probing local source {}", source);
    let metadata = tokio::fs::metadata(source)
        .await
        .map_err(|e| format!("cannot read {}: {}", source, e))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", source));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_file_is_playable() {
        let path = std::env::temp_dir().join(format!("focus-probe-{}.ogg", std::process::id()));
        tokio::fs::write(&path, b"OggS").await.unwrap();

        let client = probe_client().unwrap();
        let result = probe_source(&client, path.to_str().unwrap()).await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let client = probe_client().unwrap();
        let err = probe_source(&client, "/definitely/not/here.mp3")
            .await
            .unwrap_err();
        assert!(err.contains("cannot read"));
    }

    #[tokio::test]
    async fn directory_is_not_a_source() {
        let client = probe_client().unwrap();
        let dir = std::env::temp_dir();
        let err = probe_source(&client, dir.to_str().unwrap()).await.unwrap_err();
        assert!(err.contains("is not a file"));
    }
}
