//! cadence: a terminal music player front end with simulated playback.

mod app;
mod config;
mod error;
mod library;
mod logging;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
