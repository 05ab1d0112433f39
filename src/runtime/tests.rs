use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event_loop::{EventLoopState, drain_ticks, handle_key_event};
use super::startup::{build_app, catalog_path, load_startup_catalog};
use crate::app::App;
use crate::config::{CatalogSettings, Settings};
use crate::library::tests::track;
use crate::library::{CatalogError, TrackId};
use crate::player::{Engine, EngineOptions, ManualScheduler, RepeatMode};

fn app() -> App {
    let (scheduler, _timer) = ManualScheduler::new();
    let tracks = vec![
        track(1, "Alpha", 100),
        track(2, "Beta", 200),
        track(3, "Gamma", 300),
    ];
    let options = EngineOptions {
        seed: Some(3),
        ..EngineOptions::default()
    };
    App::new(Engine::from_tracks(tracks, options, Box::new(scheduler)).unwrap())
}

fn press(app: &mut App, state: &mut EventLoopState, code: KeyCode) -> bool {
    handle_key_event(
        KeyEvent::new(code, KeyModifiers::NONE),
        &Settings::default(),
        app,
        state,
    )
}

fn ctrl(app: &mut App, state: &mut EventLoopState, c: char) -> bool {
    handle_key_event(
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL),
        &Settings::default(),
        app,
        state,
    )
}

#[test]
fn transport_keys_drive_the_engine() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char(' '));
    assert!(app.engine.state().is_playing);
    press(&mut app, &mut st, KeyCode::Char('p'));
    assert!(!app.engine.state().is_playing);

    press(&mut app, &mut st, KeyCode::Char('l'));
    assert_eq!(app.engine.state().current_track_id, TrackId(2));
    press(&mut app, &mut st, KeyCode::Char('n'));
    assert_eq!(app.engine.state().current_track_id, TrackId(3));
    press(&mut app, &mut st, KeyCode::Char('h'));
    assert_eq!(app.engine.state().current_track_id, TrackId(2));
    press(&mut app, &mut st, KeyCode::Char('b'));
    assert_eq!(app.engine.state().current_track_id, TrackId(1));
}

#[test]
fn seek_keys_use_tenths_and_scrub_seconds() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('5'));
    assert_eq!(app.engine.state().elapsed_secs, 50);
    press(&mut app, &mut st, KeyCode::Char('L'));
    assert_eq!(app.engine.state().elapsed_secs, 55);
    press(&mut app, &mut st, KeyCode::Char('H'));
    press(&mut app, &mut st, KeyCode::Char('H'));
    assert_eq!(app.engine.state().elapsed_secs, 45);
    press(&mut app, &mut st, KeyCode::Char('0'));
    assert_eq!(app.engine.state().elapsed_secs, 0);
}

#[test]
fn huge_scrub_setting_clamps_to_the_track_end() {
    let mut app = app();
    let mut st = EventLoopState::default();
    let mut settings = Settings::default();
    settings.controls.scrub_seconds = u64::MAX;

    press(&mut app, &mut st, KeyCode::Char('5'));
    let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
    handle_key_event(key('L'), &settings, &mut app, &mut st);
    assert_eq!(app.engine.state().elapsed_secs, 100);
    handle_key_event(key('H'), &settings, &mut app, &mut st);
    assert_eq!(app.engine.state().elapsed_secs, 0);
}

#[test]
fn volume_and_toggle_keys() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('+'));
    assert_eq!(app.engine.state().volume_percent, 75);
    press(&mut app, &mut st, KeyCode::Char('='));
    assert_eq!(app.engine.state().volume_percent, 80);
    press(&mut app, &mut st, KeyCode::Char('-'));
    assert_eq!(app.engine.state().volume_percent, 75);

    press(&mut app, &mut st, KeyCode::Char('m'));
    press(&mut app, &mut st, KeyCode::Char('s'));
    press(&mut app, &mut st, KeyCode::Char('r'));
    press(&mut app, &mut st, KeyCode::Char('f'));
    let s = app.engine.state();
    assert!(s.is_muted);
    assert!(s.is_shuffled);
    assert_eq!(s.repeat_mode, RepeatMode::One);
    assert!(s.is_liked);
}

#[test]
fn alt_digits_set_the_volume_in_tenths() {
    let mut app = app();
    let mut st = EventLoopState::default();
    let alt = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT);

    handle_key_event(alt('3'), &Settings::default(), &mut app, &mut st);
    assert_eq!(app.engine.state().volume_percent, 30);
    assert_eq!(app.engine.state().elapsed_secs, 0);

    handle_key_event(alt('0'), &Settings::default(), &mut app, &mut st);
    let s = app.engine.state();
    assert_eq!(s.volume_percent, 0);
    assert!(s.is_muted);

    handle_key_event(alt('9'), &Settings::default(), &mut app, &mut st);
    let s = app.engine.state();
    assert_eq!(s.volume_percent, 90);
    assert!(!s.is_muted);
}

#[test]
fn q_quits_and_other_keys_do_not() {
    let mut app = app();
    let mut st = EventLoopState::default();
    assert!(!press(&mut app, &mut st, KeyCode::Char('x')));
    assert!(!press(&mut app, &mut st, KeyCode::Esc));
    assert!(press(&mut app, &mut st, KeyCode::Char('q')));
}

#[test]
fn overlay_navigation_and_selection() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('o'));
    assert!(app.playlist_open);
    assert_eq!(app.cursor, 0);

    press(&mut app, &mut st, KeyCode::Char('j'));
    press(&mut app, &mut st, KeyCode::Down);
    assert_eq!(app.cursor, 2);
    press(&mut app, &mut st, KeyCode::Char('k'));
    assert_eq!(app.cursor, 1);

    press(&mut app, &mut st, KeyCode::Char('G'));
    assert_eq!(app.cursor, 2);
    press(&mut app, &mut st, KeyCode::Char('g'));
    assert_eq!(app.cursor, 2);
    press(&mut app, &mut st, KeyCode::Char('g'));
    assert_eq!(app.cursor, 0);

    press(&mut app, &mut st, KeyCode::Up);
    press(&mut app, &mut st, KeyCode::Enter);
    assert!(!app.playlist_open);
    assert_eq!(app.engine.state().current_track_id, TrackId(3));
}

#[test]
fn overlay_closes_on_esc_and_tab() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Tab);
    assert!(app.playlist_open);
    press(&mut app, &mut st, KeyCode::Esc);
    assert!(!app.playlist_open);

    press(&mut app, &mut st, KeyCode::Tab);
    press(&mut app, &mut st, KeyCode::Tab);
    assert!(!app.playlist_open);
}

#[test]
fn transport_keys_still_work_with_overlay_open() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('o'));
    press(&mut app, &mut st, KeyCode::Char(' '));
    assert!(app.engine.state().is_playing);
    assert!(app.playlist_open);
}

#[test]
fn filter_mode_captures_typing() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('o'));
    press(&mut app, &mut st, KeyCode::Char('/'));
    assert!(app.filter_mode);

    // 'q' and 'a' are query characters here, not commands.
    assert!(!press(&mut app, &mut st, KeyCode::Char('q')));
    press(&mut app, &mut st, KeyCode::Backspace);
    press(&mut app, &mut st, KeyCode::Char('a'));
    assert_eq!(app.filter_query, "a");
    assert_eq!(app.display_indices(), vec![0, 1, 2]);

    press(&mut app, &mut st, KeyCode::Char('a'));
    assert_eq!(app.display_indices(), vec![0, 2]);
    assert_eq!(app.cursor, 0);

    ctrl(&mut app, &mut st, 'n');
    assert_eq!(app.cursor, 2);
    ctrl(&mut app, &mut st, 'p');
    assert_eq!(app.cursor, 0);
    ctrl(&mut app, &mut st, 'j');
    assert_eq!(app.cursor, 2);
    ctrl(&mut app, &mut st, 'k');
    assert_eq!(app.cursor, 0);

    press(&mut app, &mut st, KeyCode::Esc);
    assert!(!app.filter_mode);
    assert!(app.filter_query.is_empty());
    assert!(app.playlist_open);
}

#[test]
fn enter_in_filter_mode_selects_the_match() {
    let mut app = app();
    let mut st = EventLoopState::default();

    press(&mut app, &mut st, KeyCode::Char('o'));
    press(&mut app, &mut st, KeyCode::Char('/'));
    press(&mut app, &mut st, KeyCode::Char('g'));
    press(&mut app, &mut st, KeyCode::Enter);

    assert!(!app.playlist_open);
    assert_eq!(app.engine.state().current_track_id, TrackId(3));
}

#[test]
fn cli_argument_wins_over_configured_catalog_path() {
    let settings = CatalogSettings {
        path: Some(PathBuf::from("/etc/cadence/catalog.toml")),
        ..CatalogSettings::default()
    };
    assert_eq!(
        catalog_path(Some(PathBuf::from("mine.toml")), &settings),
        Some(PathBuf::from("mine.toml"))
    );
    assert_eq!(
        catalog_path(None, &settings),
        Some(PathBuf::from("/etc/cadence/catalog.toml"))
    );
    assert_eq!(catalog_path(None, &CatalogSettings::default()), None);
}

#[test]
fn startup_catalog_defaults_to_builtin() {
    let catalog = load_startup_catalog(None, &CatalogSettings::default()).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog[0].title, "Midnight Dreams");
}

#[test]
fn startup_catalog_reads_file_and_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r#"
[[tracks]]
id = 10
title = "Solo"
artist = "Someone"
album = "Alone"
duration = "1:05"
"#,
    )
    .unwrap();

    let catalog = load_startup_catalog(Some(path), &CatalogSettings::default()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].duration_secs, 65);

    let missing = dir.path().join("missing.toml");
    let err = load_startup_catalog(Some(missing), &CatalogSettings::default()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn threaded_app_advances_on_real_ticks() {
    let mut settings = Settings::default();
    settings.playback.tick_ms = 5;
    let catalog = load_startup_catalog(None, &settings.catalog).unwrap();
    let (tick_tx, tick_rx) = mpsc::channel();
    let mut app = build_app(&settings, catalog, tick_tx);

    app.dispatch(crate::player::Command::TogglePlay);
    std::thread::sleep(Duration::from_millis(100));
    drain_ticks(&mut app, &tick_rx);
    let elapsed = app.engine.state().elapsed_secs;
    assert!(elapsed >= 1, "no ticks were delivered");

    app.dispatch(crate::player::Command::TogglePlay);
    drain_ticks(&mut app, &tick_rx);
    let paused_at = app.engine.state().elapsed_secs;
    std::thread::sleep(Duration::from_millis(30));
    drain_ticks(&mut app, &tick_rx);
    assert_eq!(app.engine.state().elapsed_secs, paused_at);

    app.shutdown();
}
