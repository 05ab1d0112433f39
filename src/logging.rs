//! Tracing setup.
//!
//! The TUI owns the terminal, so log output only goes to a file and only when
//! `log.file` is configured. The filter comes from `CADENCE_LOG`, falling back
//! to `log.level`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

pub const LOG_ENV_VAR: &str = "CADENCE_LOG";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Install the global subscriber. Returns `Ok(false)` when logging is disabled.
pub fn init(settings: &LogSettings) -> Result<bool, LogError> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;

    let filter = filter_from(std::env::var(LOG_ENV_VAR).ok(), &settings.level);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(true)
}

/// Build the filter from an env directive, else `level`, else `info`.
fn filter_from(env: Option<String>, level: &str) -> EnvFilter {
    env.and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
