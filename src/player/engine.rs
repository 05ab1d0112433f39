//! The playback state machine.
//!
//! `Engine` owns the catalog, the `PlayerState`, the shuffle RNG and the tick
//! timer. Every mutation goes through one of its operations, and each
//! operation finishes by reconciling the timer with the new state: the timer
//! runs if and only if the player is playing and the playhead is short of the
//! end of the current track.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::PlaybackSettings;
use crate::error::{Error, Result};
use crate::library::{Catalog, Track, TrackId};

use super::advance::{next_index, previous_index};
use super::scheduler::Scheduler;
use super::types::{Command, PlayerState, RepeatMode, TickOutcome};

/// Initial state and behavior knobs for an `Engine`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Wall-clock length of one simulated second.
    pub tick_period: Duration,
    pub volume: u8,
    pub shuffle: bool,
    pub repeat_mode: RepeatMode,
    /// Shuffle picks never land on the current track (when more than one exists).
    pub avoid_repeat: bool,
    /// Seed for the shuffle RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            volume: 70,
            shuffle: false,
            repeat_mode: RepeatMode::Off,
            avoid_repeat: false,
            seed: None,
        }
    }
}

impl From<&PlaybackSettings> for EngineOptions {
    fn from(s: &PlaybackSettings) -> Self {
        Self {
            tick_period: Duration::from_millis(s.tick_ms.max(1)),
            volume: s.volume.min(100),
            shuffle: s.shuffle,
            repeat_mode: s.repeat_mode.into(),
            avoid_repeat: s.shuffle_avoid_repeat,
            seed: s.shuffle_seed,
        }
    }
}

pub struct Engine {
    catalog: Catalog,
    state: PlayerState,
    current: usize,

    tick_period: Duration,
    avoid_repeat: bool,
    rng: StdRng,

    scheduler: Box<dyn Scheduler>,
    /// Generation of the running timer, if one is running.
    timer: Option<u64>,
    generation: u64,
}

impl Engine {
    /// Create an engine positioned on the first catalog track, paused.
    pub fn new(catalog: Catalog, options: EngineOptions, scheduler: Box<dyn Scheduler>) -> Self {
        let volume = options.volume.min(100);
        let state = PlayerState {
            current_track_id: catalog[0].id,
            elapsed_secs: 0,
            is_playing: false,
            volume_percent: volume,
            is_muted: volume == 0,
            is_shuffled: options.shuffle,
            repeat_mode: options.repeat_mode,
            is_liked: false,
        };

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog,
            state,
            current: 0,
            tick_period: options.tick_period,
            avoid_repeat: options.avoid_repeat,
            rng,
            scheduler,
            timer: None,
            generation: 0,
        }
    }

    /// Validate `tracks` into a catalog and build an engine on top of it.
    #[cfg(test)]
    pub fn from_tracks(
        tracks: Vec<Track>,
        options: EngineOptions,
        scheduler: Box<dyn Scheduler>,
    ) -> Result<Self> {
        let catalog = Catalog::new(tracks)?;
        Ok(Self::new(catalog, options, scheduler))
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        &self.catalog[self.current]
    }

    /// Playhead position as a fraction of the current track, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let duration = self.current_track().duration_secs;
        if duration == 0 {
            return 0.0;
        }
        (f64::from(self.state.elapsed_secs) / f64::from(duration)).clamp(0.0, 1.0)
    }

    #[cfg(test)]
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Run a user command. Only `SelectTrack` can fail.
    pub fn apply(&mut self, cmd: Command) -> Result<()> {
        debug!(?cmd, "apply");
        match cmd {
            Command::TogglePlay => self.toggle_play(),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Seek(fraction) => self.seek(fraction),
            Command::SeekBy(delta) => self.seek_by(delta),
            Command::SelectTrack(id) => self.select_track(id)?,
            Command::SetVolume(v) => self.set_volume(v),
            Command::AdjustVolume(delta) => self.adjust_volume(delta),
            Command::ToggleMute => self.toggle_mute(),
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::CycleRepeat => self.cycle_repeat(),
            Command::ToggleLike => self.toggle_like(),
        }
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        if self.state.is_playing && self.at_end() {
            // Resuming with the playhead parked at the end (after a seek to 100%).
            self.finish_track();
            return;
        }
        self.sync_timer(false);
    }

    /// Advance the playhead by one simulated second, resolving the track boundary.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_playing {
            return TickOutcome::Idle;
        }

        let duration = self.current_track().duration_secs;
        if self.state.elapsed_secs.saturating_add(1) >= duration {
            return self.finish_track();
        }

        self.state.elapsed_secs += 1;
        trace!(elapsed = self.state.elapsed_secs, "tick");
        TickOutcome::Progressed
    }

    /// Timer callback. Ticks from a cancelled or replaced timer are dropped.
    pub fn on_timer(&mut self, generation: u64) -> Option<TickOutcome> {
        if self.timer != Some(generation) {
            trace!(generation, current = ?self.timer, "stale tick ignored");
            return None;
        }
        Some(self.tick())
    }

    pub fn seek(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let duration = self.current_track().duration_secs;
        let target = (fraction * f64::from(duration)).round() as u32;
        self.set_elapsed(target);
    }

    pub fn seek_by(&mut self, delta_secs: i64) {
        let duration = i64::from(self.current_track().duration_secs);
        let target = i64::from(self.state.elapsed_secs)
            .saturating_add(delta_secs)
            .clamp(0, duration);
        self.set_elapsed(target as u32);
    }

    /// Explicit next: always moves on, even under repeat-one.
    pub fn next(&mut self) {
        let to = self.advance_index();
        self.move_to(to);
    }

    /// Sequential predecessor; shuffle does not apply.
    pub fn previous(&mut self) {
        let to = previous_index(self.current, self.catalog.len());
        self.move_to(to);
    }

    pub fn select_track(&mut self, id: TrackId) -> Result<()> {
        let index = self.catalog.index_of(id).ok_or(Error::NotFound(id))?;
        info!(track = %id, title = %self.catalog[index].title, "select");
        self.move_to(index);
        Ok(())
    }

    /// Set the volume (clamped to 0..=100). Zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, percent: i32) {
        let v = percent.clamp(0, 100) as u8;
        self.state.volume_percent = v;
        self.state.is_muted = v == 0;
        debug!(volume = v, effective = self.state.effective_volume(), "volume");
    }

    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(i32::from(self.state.volume_percent).saturating_add(delta));
    }

    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        debug!(effective = self.state.effective_volume(), "mute toggled");
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffled = !self.state.is_shuffled;
    }

    pub fn cycle_repeat(&mut self) {
        self.state.repeat_mode = self.state.repeat_mode.cycled();
    }

    pub fn toggle_like(&mut self) {
        self.state.is_liked = !self.state.is_liked;
    }

    /// Cancel the tick timer. Playback state is left as is.
    pub fn shutdown(&mut self) {
        if let Some(generation) = self.timer.take() {
            debug!(generation, "timer cancelled (shutdown)");
            self.scheduler.cancel();
        }
    }

    fn at_end(&self) -> bool {
        self.state.elapsed_secs >= self.current_track().duration_secs
    }

    fn advance_index(&mut self) -> usize {
        next_index(
            self.current,
            self.catalog.len(),
            self.state.is_shuffled,
            self.avoid_repeat,
            &mut self.rng,
        )
    }

    fn move_to(&mut self, index: usize) {
        self.current = index;
        self.state.current_track_id = self.catalog[index].id;
        self.state.elapsed_secs = 0;
        self.sync_timer(true);
    }

    fn set_elapsed(&mut self, secs: u32) {
        self.state.elapsed_secs = secs.min(self.current_track().duration_secs);
        if self.state.is_playing && self.at_end() {
            self.finish_track();
            return;
        }
        self.sync_timer(false);
    }

    /// Track boundary: restart under repeat-one, otherwise advance. Playback
    /// resumes within the same call, so the stop at the boundary is never observable.
    fn finish_track(&mut self) -> TickOutcome {
        let from = self.state.current_track_id;
        let outcome = if self.state.repeat_mode == RepeatMode::One {
            info!(track = %from, "repeat");
            self.state.elapsed_secs = 0;
            TickOutcome::Restarted
        } else {
            let to = self.advance_index();
            self.current = to;
            self.state.current_track_id = self.catalog[to].id;
            self.state.elapsed_secs = 0;
            info!(from = %from, to = %self.state.current_track_id, "advance");
            TickOutcome::Advanced {
                from,
                to: self.state.current_track_id,
            }
        };
        self.state.is_playing = true;
        self.sync_timer(true);
        outcome
    }

    /// Start, restart or cancel the timer so it runs iff playing and short of the end.
    fn sync_timer(&mut self, restart: bool) {
        let should_run = self.state.is_playing && !self.at_end();
        match (should_run, self.timer) {
            (true, Some(_)) if !restart => {}
            (true, _) => {
                self.generation += 1;
                self.scheduler.start(self.tick_period, self.generation);
                self.timer = Some(self.generation);
                debug!(generation = self.generation, "timer started");
            }
            (false, Some(generation)) => {
                self.scheduler.cancel();
                self.timer = None;
                debug!(generation, "timer cancelled");
            }
            (false, None) => {}
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
