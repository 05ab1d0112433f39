use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::CatalogSettings;

use super::catalog::{Catalog, CatalogError};
use super::display::display_from_fields;
use super::duration::parse_duration_label;
use super::model::{Track, TrackId};

const BUILTIN_CATALOG: &str = include_str!("../../assets/sample_catalog.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<TrackRecord>,
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    id: TrackId,
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    duration: String,
    #[serde(default)]
    artwork: String,
}

/// Parse a TOML catalog document (`[[tracks]]` tables) into a validated `Catalog`.
pub fn parse_catalog(text: &str, settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(text)?;

    let mut tracks: Vec<Track> = Vec::with_capacity(file.tracks.len());
    for rec in file.tracks {
        let Some(duration_secs) = parse_duration_label(&rec.duration) else {
            return Err(CatalogError::InvalidDuration {
                id: rec.id,
                label: rec.duration,
            });
        };

        let mut track = Track {
            id: rec.id,
            title: rec.title,
            artist: rec.artist,
            album: rec.album,
            duration_secs,
            duration_label: rec.duration.trim().to_string(),
            artwork: rec.artwork,
            display: String::new(),
        };
        track.display =
            display_from_fields(&track, &settings.display_fields, &settings.display_separator);
        tracks.push(track);
    }

    Catalog::new(tracks)
}

/// Read and parse the catalog at `path`.
pub fn load_catalog(path: &Path, settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&text, settings)
}

/// The demo catalog compiled into the binary.
pub fn builtin_catalog(settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG, settings)
}
