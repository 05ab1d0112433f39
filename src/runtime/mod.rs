use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::error::Error;
use crate::logging;

mod event_loop;
mod startup;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = startup::load_settings();

    if let Err(e) = logging::init(&settings.log) {
        eprintln!("cadence: logging disabled: {e}");
    }

    let catalog_arg = env::args_os().nth(1).map(PathBuf::from);
    let catalog =
        startup::load_startup_catalog(catalog_arg, &settings.catalog).map_err(Error::from)?;

    let (tick_tx, tick_rx) = mpsc::channel::<u64>();
    let mut app = startup::build_app(&settings, catalog, tick_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &tick_rx, &mut state)
    })();

    // Stop the ticker before tearing the terminal down.
    app.shutdown();
    info!("shutdown");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
