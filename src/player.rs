//! Simulated playback: the engine, track-advance rules and tick scheduling.
//!
//! Nothing here touches audio devices. "Playing" means a timer advances the
//! playhead once per simulated second until the track boundary, where the
//! engine restarts or moves on according to repeat and shuffle.

mod advance;
mod engine;
mod scheduler;
mod types;

pub use engine::{Engine, EngineOptions};
pub use scheduler::ThreadScheduler;
pub use types::Command;

#[cfg(test)]
pub(crate) use scheduler::{ManualScheduler, ManualTimer, Scheduler};
#[cfg(test)]
pub(crate) use types::{RepeatMode, TickOutcome};
