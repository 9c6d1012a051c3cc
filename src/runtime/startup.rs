use std::path::{Path, PathBuf};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::config;
use crate::library::FavoritesStore;
use crate::playback::PlaybackController;

/// Directory to scan: command-line argument, then `library.root`, then the
/// home directory.
pub fn resolve_root(arg: Option<String>, configured: Option<&Path>) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| configured.map(Path::to_path_buf))
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load favorites and get the app ready for the first scan result. The
/// audio device is only opened when something is played.
pub fn build_app(settings: &config::Settings, root: PathBuf) -> App<RodioBackend> {
    let backend = RodioBackend::new();
    let store = FavoritesStore::from_settings(settings);
    let mut app = App::new(PlaybackController::new(backend), store, root);
    app.set_save_on_change(settings.favorites.save_on_change);
    app.start();
    app
}

pub fn log_effective_settings(settings: &config::Settings) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    match toml::to_string_pretty(settings) {
        Ok(text) => log::debug!("effective settings:\n{text}"),
        Err(e) => log::debug!("could not render settings: {e}"),
    }
}
