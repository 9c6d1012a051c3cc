use super::*;
use crate::audio::fake::FakeBackend;
use crate::library::{AudioFileRef, ExtensionSet, FavoritesStore, ScanOutcome};
use crate::playback::{PlaybackController, PlaybackStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    app: App<FakeBackend>,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favorites.txt"), ExtensionSet::default());
        let app = App::new(
            PlaybackController::new(FakeBackend::default()),
            store,
            dir.path().to_path_buf(),
        );
        Self { dir, app }
    }

    fn touch(&self, name: &str) -> AudioFileRef {
        let p = self.dir.path().join(name);
        fs::write(&p, b"not real").unwrap();
        AudioFileRef::new(fs::canonicalize(&p).unwrap())
    }

    fn scanned(&mut self, names: &[&str]) {
        let files = names.iter().map(|n| self.touch(n)).collect();
        self.app.apply_scan(ScanOutcome {
            root: self.dir.path().to_path_buf(),
            files,
            cancelled: false,
        });
    }

    fn favorites_file(&self) -> PathBuf {
        self.dir.path().join("favorites.txt")
    }
}

fn names(files: &[AudioFileRef]) -> Vec<&str> {
    files.iter().map(|f| f.display_name()).collect()
}

#[test]
fn start_loads_favorites_and_scan_fills_all_songs() {
    let mut fx = Fixture::new();
    let outside = fx.touch("outside.wav");
    fs::write(fx.favorites_file(), format!("{}\n", outside.path().display())).unwrap();

    fx.app.start();
    assert!(fx.app.is_scanning());
    assert_eq!(names(fx.app.library().list_favorites()), vec!["outside.wav"]);

    fx.scanned(&["a.wav", "b.wav"]);
    assert!(!fx.app.is_scanning());
    assert_eq!(names(fx.app.library().list_all()), vec!["a.wav", "b.wav"]);
    assert!(fx.app.status().starts_with("Found 2 audio files"));
    assert!(fx.app.library().is_orphan(outside.path()));
}

#[test]
fn favorite_selected_row_then_again_reports_already_favorite() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav", "b.wav"]);

    fx.app.dispatch(Command::Select {
        pane: Pane::All,
        index: 1,
    });
    fx.app.dispatch(Command::Favorite);
    assert_eq!(fx.app.status(), "Added to favorites: b.wav");

    fx.app.dispatch(Command::Favorite);
    assert_eq!(fx.app.status(), "Already in favorites: b.wav");
    assert_eq!(names(fx.app.library().list_favorites()), vec!["b.wav"]);
}

#[test]
fn favorite_with_empty_list_reports_nothing_selected() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&[]);
    fx.app.dispatch(Command::Favorite);
    assert_eq!(fx.app.status(), "Nothing selected");
}

#[test]
fn remove_from_all_drops_favorite_and_clamps_selection() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav", "b.wav"]);

    fx.app.dispatch(Command::SelectLast);
    fx.app.dispatch(Command::Favorite);
    fx.app.dispatch(Command::RemoveFromAll);

    assert_eq!(fx.app.status(), "Removed from All Songs and favorites: b.wav");
    assert_eq!(names(fx.app.library().list_all()), vec!["a.wav"]);
    assert!(fx.app.library().list_favorites().is_empty());
    assert_eq!(fx.app.selected(Pane::All), 0);
}

#[test]
fn remove_selected_in_favorites_pane_only_unfavorites() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav", "b.wav"]);
    fx.app.dispatch(Command::Favorite);

    fx.app.dispatch(Command::Focus(Pane::Favorites));
    fx.app.dispatch(Command::RemoveSelected);

    assert_eq!(fx.app.status(), "Removed from favorites: a.wav");
    assert!(fx.app.library().list_favorites().is_empty());
    assert_eq!(fx.app.library().len_all(), 2);
}

#[test]
fn remove_from_all_on_orphan_favorite_reports_not_found() {
    let mut fx = Fixture::new();
    let outside = fx.touch("outside.wav");
    fs::write(fx.favorites_file(), format!("{}\n", outside.path().display())).unwrap();
    fx.app.start();
    fx.scanned(&["a.wav"]);

    fx.app.dispatch(Command::Focus(Pane::Favorites));
    fx.app.dispatch(Command::RemoveFromAll);
    assert_eq!(fx.app.status(), "Selected song is not in All Songs");
    assert_eq!(fx.app.library().len_favorites(), 1);
}

#[test]
fn unfavorite_from_all_pane_needs_a_favorite_row() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav"]);
    fx.app.dispatch(Command::Unfavorite);
    assert_eq!(fx.app.status(), "Selected song is not a favorite");
}

#[test]
fn activate_plays_and_transport_updates_status() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav"]);

    fx.app.dispatch(Command::Activate);
    assert_eq!(fx.app.status(), "Playing: a.wav");

    fx.app.dispatch(Command::PlayPause);
    assert_eq!(fx.app.status(), "Paused: a.wav");
    assert_eq!(fx.app.player().status(), PlaybackStatus::Paused);

    fx.app.dispatch(Command::Pause);
    assert_eq!(fx.app.status(), "Cannot pause while paused");

    fx.app.dispatch(Command::Stop);
    assert_eq!(fx.app.status(), "Stopped: a.wav");
}

#[test]
fn play_without_loaded_file_is_reported() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav"]);
    fx.app.dispatch(Command::Play);
    assert_eq!(
        fx.app.status(),
        "Nothing loaded: press Enter on a song first"
    );
}

#[test]
fn activate_failure_names_the_file() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["bad.wav"]);
    let bad = fx.dir.path().join("bad.wav");
    fx.app.player_mut().backend_mut().unsupported.insert(bad);

    fx.app.dispatch(Command::Activate);
    assert!(fx.app.status().starts_with("Error playing bad.wav"));
    assert!(fx.app.player().current().is_none());
}

#[test]
fn end_of_file_returns_to_stopped_on_tick() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav"]);
    fx.app.dispatch(Command::Activate);

    fx.app.player_mut().backend_mut().finished = true;
    fx.app.tick();
    assert_eq!(fx.app.player().status(), PlaybackStatus::Stopped);
    assert_eq!(fx.app.status(), "Stopped: a.wav");
}

#[test]
fn cursor_wraps_in_focused_list() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav", "b.wav", "c.wav"]);

    fx.app.dispatch(Command::SelectPrev);
    assert_eq!(fx.app.selected(Pane::All), 2);
    fx.app.dispatch(Command::SelectNext);
    assert_eq!(fx.app.selected(Pane::All), 0);

    fx.app.dispatch(Command::FocusNext);
    assert_eq!(fx.app.focus, Pane::Favorites);
    fx.app.dispatch(Command::SelectNext);
    assert_eq!(fx.app.selected(Pane::Favorites), 0);
}

#[test]
fn rescan_is_refused_while_scanning() {
    let mut fx = Fixture::new();
    fx.app.start();
    assert_eq!(fx.app.dispatch(Command::Rescan), Flow::Continue);

    fx.scanned(&["a.wav"]);
    assert_eq!(fx.app.dispatch(Command::Rescan), Flow::StartScan);
    assert!(fx.app.is_scanning());
    assert_eq!(fx.app.dispatch(Command::Quit), Flow::Quit);
}

#[test]
fn shutdown_saves_favorites_exactly_once() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.scanned(&["a.wav"]);
    fx.app.dispatch(Command::Favorite);

    fx.app.shutdown().unwrap();
    let saved = fs::read_to_string(fx.favorites_file()).unwrap();
    assert!(saved.trim_end().ends_with("a.wav"));

    fs::remove_file(fx.favorites_file()).unwrap();
    fx.app.shutdown().unwrap();
    assert!(!Path::new(&fx.favorites_file()).exists());
}

#[test]
fn save_on_change_writes_after_each_mutation() {
    let mut fx = Fixture::new();
    fx.app.set_save_on_change(true);
    fx.app.start();
    fx.scanned(&["a.wav"]);

    fx.app.dispatch(Command::Favorite);
    assert!(fx.favorites_file().exists());

    fx.app.dispatch(Command::Unfavorite);
    assert_eq!(fs::read_to_string(fx.favorites_file()).unwrap(), "");
}

#[test]
fn save_favorites_command_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = FavoritesStore::new(
        dir.path().join("missing-dir").join("favorites.txt"),
        ExtensionSet::default(),
    );
    let mut app = App::new(
        PlaybackController::new(FakeBackend::default()),
        store,
        dir.path().to_path_buf(),
    );
    app.start();
    app.dispatch(Command::SaveFavorites);
    assert!(app.status().starts_with("Failed to save favorites"));
}

#[test]
fn missing_output_device_only_affects_playback() {
    let mut fx = Fixture::new();
    fx.app.player_mut().backend_mut().no_output = true;
    fx.app.start();
    fx.scanned(&["a.wav", "b.wav"]);

    fx.app.dispatch(Command::Activate);
    assert!(fx.app.status().starts_with("Error playing a.wav"));
    assert!(fx.app.status().contains("audio output unavailable"));
    assert_eq!(fx.app.player().status(), PlaybackStatus::Stopped);

    fx.app.dispatch(Command::Favorite);
    assert_eq!(fx.app.status(), "Added to favorites: a.wav");
    fx.app.dispatch(Command::SelectLast);
    fx.app.dispatch(Command::RemoveFromAll);
    assert_eq!(fx.app.status(), "Removed from All Songs: b.wav");

    fx.app.shutdown().unwrap();
    let saved = fs::read_to_string(fx.favorites_file()).unwrap();
    assert!(saved.trim_end().ends_with("a.wav"));
}

#[test]
fn scan_that_ended_without_files_allows_rescan() {
    let mut fx = Fixture::new();
    fx.app.start();
    fx.app.apply_scan(ScanOutcome {
        root: fx.dir.path().to_path_buf(),
        files: Vec::new(),
        cancelled: true,
    });

    assert!(!fx.app.is_scanning());
    assert_eq!(fx.app.status(), "Scan cancelled, 0 audio files so far");
    assert_eq!(fx.app.dispatch(Command::Rescan), Flow::StartScan);
}
