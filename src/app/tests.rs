use super::*;
use crate::library::tests::track;
use crate::library::{Track, TrackId};
use crate::player::{Command, Engine, EngineOptions, ManualScheduler};

fn t(id: u64, title: &str) -> Track {
    track(id, title, 30)
}

fn app_with(tracks: Vec<Track>) -> App {
    let (scheduler, _timer) = ManualScheduler::new();
    let options = EngineOptions {
        seed: Some(1),
        ..EngineOptions::default()
    };
    App::new(Engine::from_tracks(tracks, options, Box::new(scheduler)).unwrap())
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(App::fuzzy_match_positions(title, "hw").is_some());
    assert!(App::fuzzy_match_positions(title, "ello").is_some());
    assert!(App::fuzzy_match_positions(title, "xyz").is_none());
    assert_eq!(App::fuzzy_match_positions(title, "hw"), Some(vec![0, 6]));
}

#[test]
fn display_indices_respects_filter_query() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.push_filter_char('m');
    assert_eq!(app.display_indices(), vec![2]);
}

#[test]
fn display_indices_uses_fuzzy_not_substring_only() {
    let mut app = app_with(vec![
        t(1, "Metallica - Blackened"),
        t(2, "Black Sabbath - Paranoid"),
    ]);
    // Letters appear in order but not contiguously.
    app.filter_query = "mtbk".into();
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn trimming_filter_query_affects_matching() {
    let mut app = app_with(vec![t(1, "Black Sabbath - Paranoid")]);
    app.filter_query = "Black ".into();
    assert_eq!(app.display_indices(), vec![0]);

    app.filter_query = "   ".into();
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn large_catalogs_precompute_lowercase_labels() {
    let tracks: Vec<Track> = (0..150).map(|i| t(i, &format!("Song {i}"))).collect();
    let mut app = app_with(tracks);
    assert!(app.uses_lower_titles());

    app.filter_query = "SONG 14".into();
    let visible = app.display_indices();
    assert!(visible.contains(&14));
    assert!(visible.contains(&149));
    assert!(!visible.contains(&15));
    assert_eq!(
        app.fuzzy_match_positions_for_track_lower(14, "s14"),
        Some(vec![0, 5, 6])
    );
}

#[test]
fn next_prev_in_view_helpers_work() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.filter_query = "et".into(); // only Beta is visible

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));
    assert_eq!(app.next_in_view_from(1), Some(1));
    assert_eq!(app.prev_in_view_from(1), Some(1));
}

#[test]
fn cursor_movement_wraps_over_visible_rows() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.open_playlist();
    assert_eq!(app.cursor, 0);

    app.cursor_prev();
    assert_eq!(app.cursor, 2);
    app.cursor_next();
    assert_eq!(app.cursor, 0);
    app.cursor_bottom();
    assert_eq!(app.cursor, 2);
    app.cursor_top();
    assert_eq!(app.cursor, 0);
}

#[test]
fn opening_the_playlist_puts_cursor_on_current_track() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.dispatch(Command::Previous);
    app.open_playlist();
    assert!(app.playlist_open);
    assert_eq!(app.cursor, 2);
}

#[test]
fn filtering_moves_cursor_onto_a_visible_row() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.open_playlist();
    app.enter_filter_mode();
    app.push_filter_char('g');
    assert_eq!(app.cursor, 2);

    app.pop_filter_char();
    assert_eq!(app.cursor, 2);
    app.clear_filter();
    assert!(!app.filter_mode);
    assert!(app.filter_query.is_empty());
}

#[test]
fn choosing_selects_the_track_and_closes_the_overlay() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta"), t(3, "Gamma")]);
    app.dispatch(Command::TogglePlay);
    app.dispatch(Command::Seek(0.5));

    app.open_playlist();
    app.enter_filter_mode();
    app.push_filter_char('b');
    app.choose_at_cursor();

    let s = app.engine.state();
    assert_eq!(s.current_track_id, TrackId(2));
    assert_eq!(s.elapsed_secs, 0);
    assert!(s.is_playing);
    assert!(!app.playlist_open);
    assert!(app.filter_query.is_empty());
}

#[test]
fn choosing_with_no_visible_rows_does_nothing() {
    let mut app = app_with(vec![t(1, "Alpha"), t(2, "Beta")]);
    app.open_playlist();
    app.filter_query = "zzz".into();
    app.choose_at_cursor();
    assert!(app.playlist_open);
    assert_eq!(app.engine.state().current_track_id, TrackId(1));
}

#[test]
fn rejected_commands_surface_in_the_status_line() {
    let mut app = app_with(vec![t(1, "Alpha")]);
    app.dispatch(Command::SelectTrack(TrackId(42)));
    assert_eq!(
        app.status_message.as_deref(),
        Some("track #42 not found in catalog")
    );

    app.dispatch(Command::ToggleLike);
    assert!(app.status_message.is_none());
}

#[test]
fn toggle_playlist_round_trips() {
    let mut app = app_with(vec![t(1, "Alpha")]);
    app.toggle_playlist();
    assert!(app.playlist_open);
    app.filter_query = "x".into();
    app.toggle_playlist();
    assert!(!app.playlist_open);
    assert!(app.filter_query.is_empty());
}
