//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the player engine together
//! with the playlist overlay state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
