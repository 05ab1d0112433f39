//! Track catalog: model, validation and loading.
//!
//! The catalog is supplied from outside the player (a TOML file or the
//! built-in demo set) and never mutated once loaded.

mod catalog;
mod display;
mod duration;
mod load;
mod model;

pub use catalog::{Catalog, CatalogError};
pub use duration::format_mss;
pub use load::{builtin_catalog, load_catalog};
pub use model::{Track, TrackId};

#[cfg(test)]
pub(crate) use display::display_from_fields;
