use std::fmt;

use serde::Deserialize;

/// Stable, comparable identifier of a catalog entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Simulated length, always > 0.
    pub duration_secs: u32,
    /// The duration string exactly as the catalog spelled it (e.g. `3:24`).
    pub duration_label: String,
    /// Opaque artwork reference (URL or path); never dereferenced.
    pub artwork: String,
    /// Precomputed playlist label.
    pub display: String,
}
