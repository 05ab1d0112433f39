//! Application model: the player engine plus playlist-overlay UI state.
//!
//! `App` owns the `Engine` and is the only thing the event loop mutates. The
//! overlay cursor, fuzzy filter and status line live here; the playback state
//! machine lives in the engine.

use tracing::warn;

use crate::player::{Command, Engine};

/// The main application model.
pub struct App {
    pub engine: Engine,

    /// Playlist overlay visible.
    pub playlist_open: bool,
    /// Catalog index under the overlay cursor.
    pub cursor: usize,

    pub filter_mode: bool,
    pub filter_query: String,
    lower_titles: Option<Vec<String>>,

    /// One-line message shown in the status box (last error, if any).
    pub status_message: Option<String>,
}

impl App {
    /// Create a new `App` around `engine`.
    pub fn new(engine: Engine) -> Self {
        // Precompute lowercase labels for larger catalogs so fuzzy filtering
        // does not lowercase per char on every redraw/keystroke.
        let lower_titles = if engine.catalog().len() > 100 {
            Some(
                engine
                    .catalog()
                    .iter()
                    .map(|t| t.display.to_ascii_lowercase())
                    .collect(),
            )
        } else {
            None
        };

        Self {
            engine,
            playlist_open: false,
            cursor: 0,
            filter_mode: false,
            filter_query: String::new(),
            lower_titles,
            status_message: None,
        }
    }

    /// Run a transport command against the engine, surfacing failures in the status line.
    pub fn dispatch(&mut self, cmd: Command) {
        match self.engine.apply(cmd) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                warn!("command rejected: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Show the playlist overlay with the cursor on the current track.
    pub fn open_playlist(&mut self) {
        self.playlist_open = true;
        self.cursor = self.engine.current_index();
        self.ensure_cursor_visible();
    }

    /// Hide the overlay and drop any filter.
    pub fn close_playlist(&mut self) {
        self.playlist_open = false;
        self.filter_mode = false;
        self.filter_query.clear();
    }

    pub fn toggle_playlist(&mut self) {
        if self.playlist_open {
            self.close_playlist();
        } else {
            self.open_playlist();
        }
    }

    /// Select the track under the cursor and close the overlay.
    pub fn choose_at_cursor(&mut self) {
        if self.display_indices().is_empty() {
            return;
        }
        let id = self.engine.catalog()[self.cursor].id;
        self.dispatch(Command::SelectTrack(id));
        self.close_playlist();
    }

    /// Return the overlay rows (catalog indices), taking the filter into account.
    pub fn display_indices(&self) -> Vec<usize> {
        let len = self.engine.catalog().len();
        let query = self.filter_query.trim();
        if query.is_empty() {
            return (0..len).collect();
        }

        match self.lower_titles.as_deref() {
            Some(lower_titles) => {
                let query_lower = query.to_ascii_lowercase();
                (0..len)
                    .filter(|&i| {
                        Self::fuzzy_match_positions_lower(&lower_titles[i], &query_lower).is_some()
                    })
                    .collect()
            }
            None => (0..len)
                .filter(|&i| {
                    Self::fuzzy_match_positions(&self.engine.catalog()[i].display, query)
                        .is_some()
                })
                .collect(),
        }
    }

    /// Return true if this `App` uses precomputed lowercase titles.
    pub fn uses_lower_titles(&self) -> bool {
        self.lower_titles.is_some()
    }

    /// Fuzzy-match `query_lower` against a specific track by index.
    ///
    /// Returns the character positions that match, or `None` when there is no match.
    pub fn fuzzy_match_positions_for_track_lower(
        &self,
        track_index: usize,
        query_lower: &str,
    ) -> Option<Vec<usize>> {
        if query_lower.is_empty() {
            return Some(Vec::new());
        }

        match self.lower_titles.as_deref() {
            Some(lower_titles) => {
                Self::fuzzy_match_positions_lower(&lower_titles[track_index], query_lower)
            }
            None => Self::fuzzy_match_positions(
                &self.engine.catalog()[track_index].display,
                query_lower,
            ),
        }
    }

    /// Return the next visible index after `current`. Wraps around to the first row.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`. Wraps around to the last row.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Fuzzy/subsequence match: return the character positions in `title`
    /// that match `query`, or `None` if not matched.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    fn fuzzy_match_positions_lower(title_lower: &str, query_lower: &str) -> Option<Vec<usize>> {
        if query_lower.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title_lower.chars().enumerate();

        for qc in query_lower.chars() {
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc == qc => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Enter filter mode inside the overlay.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_cursor_visible();
    }
    /// Clear the active filter and restore cursor visibility.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_cursor_visible();
    }
    /// Append a character to the filter query and refresh view.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_cursor_visible();
    }
    /// Remove the last character from the filter query and refresh view.
    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_cursor_visible();
    }

    /// Move the cursor onto the first visible row if filtering hid it.
    fn ensure_cursor_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.cursor = 0;
            return;
        }

        if !display.contains(&self.cursor) {
            self.cursor = display[0];
        }
    }

    /// Move the cursor to the next visible track.
    pub fn cursor_next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.cursor) {
            self.cursor = next;
        }
    }

    /// Move the cursor to the previous visible track.
    pub fn cursor_prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn cursor_top(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.cursor = first;
        }
    }

    pub fn cursor_bottom(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.cursor = last;
        }
    }

    /// Cancel the tick timer before the app goes away.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}
