//! Crate-level error type.

use thiserror::Error;

use crate::library::{CatalogError, TrackId};

#[derive(Debug, Error)]
pub enum Error {
    /// `select_track` was handed an id the catalog does not contain.
    #[error("track {0} not found in catalog")]
    NotFound(TrackId),

    /// The catalog could not back an engine (empty, duplicate ids, unreadable).
    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, Error>;
