use crate::config::TrackDisplayField;

use super::duration::format_mss;
use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Composes metadata fields (artist, title, album, duration, id) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Display => {
                // Outside of an existing label, "display" means "artist - title".
                if let Some(a) = non_empty(&track.artist) {
                    parts.push(a.to_string());
                }
                if let Some(t) = non_empty(&track.title) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Title => {
                if let Some(t) = non_empty(&track.title) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = non_empty(&track.artist) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = non_empty(&track.album) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Duration => parts.push(format_mss(track.duration_secs)),
            TrackDisplayField::Id => parts.push(track.id.to_string()),
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s.trim()).filter(|s| !s.is_empty())
}
