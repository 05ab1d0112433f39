//! Startup wiring: settings, catalog selection and the initial `App`.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use tracing::info;

use crate::app::App;
use crate::config::{self, CatalogSettings};
use crate::library::{Catalog, CatalogError, builtin_catalog, load_catalog};
use crate::player::{Engine, EngineOptions, ThreadScheduler};

/// Load settings; a missing or broken config never stops the app.
pub fn load_settings() -> config::Settings {
    let loaded = config::Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    loaded.unwrap_or_else(|msg| {
        eprintln!("cadence: {msg}, using defaults");
        config::Settings::default()
    })
}

/// Catalog file to load: the CLI argument wins over `catalog.path`.
pub fn catalog_path(arg: Option<PathBuf>, settings: &CatalogSettings) -> Option<PathBuf> {
    arg.or_else(|| settings.path.clone())
}

/// Load the startup catalog, falling back to the built-in demo tracks.
pub fn load_startup_catalog(
    arg: Option<PathBuf>,
    settings: &CatalogSettings,
) -> Result<Catalog, CatalogError> {
    let catalog = match catalog_path(arg, settings) {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            load_catalog(&path, settings)?
        }
        None => {
            info!("using built-in catalog");
            builtin_catalog(settings)?
        }
    };
    info!(tracks = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Build the app around a thread-backed engine that reports ticks on `tick_tx`.
pub fn build_app(settings: &config::Settings, catalog: Catalog, tick_tx: Sender<u64>) -> App {
    let options = EngineOptions::from(&settings.playback);
    let engine = Engine::new(catalog, options, Box::new(ThreadScheduler::new(tick_tx)));
    App::new(engine)
}
