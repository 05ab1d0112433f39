use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, trace};

use crate::app::App;
use crate::config;
use crate::player::Command;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: feeds timer ticks to the engine, draws, and
/// handles input. Returns `Ok(())` when quit is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    tick_rx: &mpsc::Receiver<u64>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        drain_ticks(app, tick_rx);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Deliver every queued tick to the engine. Stale generations are dropped there.
pub fn drain_ticks(app: &mut App, tick_rx: &mpsc::Receiver<u64>) {
    loop {
        match tick_rx.try_recv() {
            Ok(generation) => {
                if let Some(outcome) = app.engine.on_timer(generation) {
                    trace!(?outcome, "tick handled");
                }
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
}

/// Map a key press to app/engine actions. Returns `true` when the app should quit.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> bool {
    if app.playlist_open && app.filter_mode {
        state.pending_gg = false;
        handle_filter_key(key, app);
        return false;
    }

    if app.playlist_open && handle_overlay_key(key, app, state) {
        return false;
    }

    state.pending_gg = false;

    let scrub = i64::try_from(settings.controls.scrub_seconds).unwrap_or(i64::MAX);
    let step = i32::from(settings.controls.volume_step);

    match key.code {
        KeyCode::Char('q') => {
            debug!("quit requested");
            return true;
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => app.dispatch(Command::TogglePlay),
        KeyCode::Char('l') | KeyCode::Char('n') => app.dispatch(Command::Next),
        KeyCode::Char('h') | KeyCode::Char('b') => app.dispatch(Command::Previous),
        KeyCode::Char('L') => app.dispatch(Command::SeekBy(scrub)),
        KeyCode::Char('H') => app.dispatch(Command::SeekBy(-scrub)),
        KeyCode::Char(c @ '0'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
            let digit = c.to_digit(10).unwrap_or(0);
            app.dispatch(Command::SetVolume(digit as i32 * 10));
        }
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            app.dispatch(Command::Seek(f64::from(tenths) / 10.0));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.dispatch(Command::AdjustVolume(step)),
        KeyCode::Char('-') => app.dispatch(Command::AdjustVolume(-step)),
        KeyCode::Char('m') => app.dispatch(Command::ToggleMute),
        KeyCode::Char('s') => app.dispatch(Command::ToggleShuffle),
        KeyCode::Char('r') => app.dispatch(Command::CycleRepeat),
        KeyCode::Char('f') => app.dispatch(Command::ToggleLike),
        KeyCode::Char('o') | KeyCode::Tab => app.toggle_playlist(),
        _ => {}
    }

    false
}

/// Overlay navigation. Returns `true` when the key was consumed.
fn handle_overlay_key(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    match key.code {
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_bottom();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_prev();
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_filter_mode();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            app.choose_at_cursor();
        }
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Tab => {
            state.pending_gg = false;
            app.close_playlist();
        }
        _ => return false,
    }
    true
}

fn handle_filter_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Down => app.cursor_next(),
        KeyCode::Up => app.cursor_prev(),
        KeyCode::Char('j') | KeyCode::Char('n')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.cursor_next()
        }
        KeyCode::Char('k') | KeyCode::Char('p')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.cursor_prev()
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.push_filter_char(c);
            }
        }
        KeyCode::Enter => app.choose_at_cursor(),
        _ => {}
    }
}
