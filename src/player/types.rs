//! Player-side value types: repeat mode, state snapshot, commands.

use crate::config::RepeatModeSetting;
use crate::library::TrackId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance past the end of a track; wrap at the end of the catalog.
    #[default]
    Off,
    /// Restart the current track when it ends.
    One,
    /// Wrap around to the start of the catalog (same as `Off` here).
    All,
}

impl RepeatMode {
    /// The next mode in the fixed `Off -> One -> All -> Off` cycle.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::All,
            Self::All => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::One => "one",
            Self::All => "all",
        }
    }
}

impl From<RepeatModeSetting> for RepeatMode {
    fn from(s: RepeatModeSetting) -> Self {
        match s {
            RepeatModeSetting::Off => Self::Off,
            RepeatModeSetting::One => Self::One,
            RepeatModeSetting::All => Self::All,
        }
    }
}

/// Mutable playback state, owned by the `Engine`.
///
/// Handed out read-only to the rendering layer after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub current_track_id: TrackId,
    pub elapsed_secs: u32,
    pub is_playing: bool,
    pub volume_percent: u8,
    pub is_muted: bool,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
    /// Session-wide flag; not remembered per track.
    pub is_liked: bool,
}

impl PlayerState {
    /// Output volume after mute is applied.
    pub fn effective_volume(&self) -> u8 {
        if self.is_muted { 0 } else { self.volume_percent }
    }
}

/// A user-invoked transport action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePlay,
    Next,
    Previous,
    /// Jump to a fraction of the current track, `0.0..=1.0`.
    Seek(f64),
    /// Scrub by whole seconds, positive or negative.
    SeekBy(i64),
    SelectTrack(TrackId),
    SetVolume(i32),
    AdjustVolume(i32),
    ToggleMute,
    ToggleShuffle,
    CycleRepeat,
    ToggleLike,
}

/// What a single `tick` did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    /// Playhead moved forward one second.
    Progressed,
    /// Track ended under repeat-one and started over.
    Restarted,
    /// Track ended and playback moved on (possibly to the same index under shuffle).
    Advanced { from: TrackId, to: TrackId },
}
