//! Layered settings: `CADENCE__*` environment variables over an optional TOML
//! file over struct defaults.
//!
//! `schema` holds the serde types for the `playback`, `controls`, `ui`,
//! `catalog` and `log` sections; `load` builds and validates them.

mod load;
mod schema;

pub use schema::*;
