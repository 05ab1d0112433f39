//! The ordered, immutable track catalog the player navigates.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use super::model::{Track, TrackId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no tracks")]
    Empty,

    #[error("duplicate track id {0}")]
    DuplicateId(TrackId),

    #[error("track {id}: invalid duration {label:?} (expected m:ss or h:mm:ss)")]
    InvalidDuration { id: TrackId, label: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Non-empty sequence of tracks with unique ids, in playback order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for t in &tracks {
            if !seen.insert(t.id) {
                return Err(CatalogError::DuplicateId(t.id));
            }
        }

        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    #[cfg(test)]
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.index_of(id).map(|i| &self.tracks[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = Track;

    fn index(&self, index: usize) -> &Track {
        &self.tracks[index]
    }
}
