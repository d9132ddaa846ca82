//! Ambient track catalog

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One selectable ambient track. An empty `source` is the silence track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientTrack {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub source: String,
}

impl AmbientTrack {
    pub fn new(id: &str, label: &str, source: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            source: source.to_string(),
        }
    }

    /// Whether this track plays nothing
    pub fn is_silent(&self) -> bool {
        self.source.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no tracks")]
    Empty,
    #[error("duplicate track id: {0}")]
    DuplicateId(String),
    #[error("catalog must contain exactly one silence track, found {0}")]
    SilenceCount(usize),
}

/// Immutable, ordered list of ambient tracks with exactly one silence entry
#[derive(Debug, Clone, Serialize)]
pub struct TrackCatalog {
    tracks: Vec<AmbientTrack>,
}

impl TrackCatalog {
    /// Validate and wrap a list of tracks
    pub fn new(tracks: Vec<AmbientTrack>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }
        }

        let silent = tracks.iter().filter(|t| t.is_silent()).count();
        if silent != 1 {
            return Err(CatalogError::SilenceCount(silent));
        }

        Ok(Self { tracks })
    }

    /// Parse a catalog from a JSON array of tracks
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let tracks: Vec<AmbientTrack> = serde_json::from_str(raw)?;
        Self::new(tracks)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn tracks(&self) -> &[AmbientTrack] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&AmbientTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// The single silence entry
    pub fn silence(&self) -> &AmbientTrack {
        // `new` guarantees exactly one silent track
        self.tracks
            .iter()
            .find(|t| t.is_silent())
            .unwrap_or(&self.tracks[0])
    }
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self {
            tracks: vec![
                AmbientTrack::new("none", "Silence", ""),
                AmbientTrack::new(
                    "rain",
                    "Soft Rain",
                    "https://www.soundjay.com/nature/rain-01.mp3",
                ),
                AmbientTrack::new(
                    "wind",
                    "Mountain Wind",
                    "https://www.soundjay.com/nature/wind-howl-01.mp3",
                ),
                AmbientTrack::new(
                    "nature",
                    "Forest Birds",
                    "https://www.soundjay.com/nature/birds-chirping-01.mp3",
                ),
            ],
        }
    }
}
