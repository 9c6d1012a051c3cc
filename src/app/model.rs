//! Application context: the library, the playback controller and the
//! favorites store, plus selection and the status line.
//!
//! The presentation layer never touches the collections directly; it sends
//! `Command`s to `App::dispatch` and renders the read-only views.

use std::path::{Path, PathBuf};

use crate::audio::AudioBackend;
use crate::error::{Collection, Error, Result};
use crate::library::{AudioFileRef, FavoritesStore, Library, ScanOutcome, Target};
use crate::playback::{PlaybackController, PlaybackStatus, Transition};

use super::command::{Command, Flow, Pane};

pub struct App<B: AudioBackend> {
    library: Library,
    player: PlaybackController<B>,
    store: FavoritesStore,
    root: PathBuf,

    pub focus: Pane,
    selected_all: usize,
    selected_favorite: usize,

    status: String,
    scanning: bool,
    save_on_change: bool,
    shut_down: bool,
}

impl<B: AudioBackend> App<B> {
    pub fn new(player: PlaybackController<B>, store: FavoritesStore, root: PathBuf) -> Self {
        Self {
            library: Library::new(),
            player,
            store,
            root,
            focus: Pane::All,
            selected_all: 0,
            selected_favorite: 0,
            status: String::new(),
            scanning: false,
            save_on_change: false,
            shut_down: false,
        }
    }

    /// Persist favorites after every change, not only at shutdown.
    pub fn set_save_on_change(&mut self, on: bool) {
        self.save_on_change = on;
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn player(&self) -> &PlaybackController<B> {
        &self.player
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlaybackController<B> {
        &mut self.player
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn selected(&self, pane: Pane) -> usize {
        match pane {
            Pane::All => self.selected_all,
            Pane::Favorites => self.selected_favorite,
        }
    }

    fn pane_len(&self, pane: Pane) -> usize {
        match pane {
            Pane::All => self.library.len_all(),
            Pane::Favorites => self.library.len_favorites(),
        }
    }

    /// The highlighted row of the focused list.
    pub fn selected_file(&self) -> Option<&AudioFileRef> {
        match self.focus {
            Pane::All => self.library.get_all(self.selected_all),
            Pane::Favorites => self.library.get_favorite(self.selected_favorite),
        }
    }

    /// Load the saved favorites and mark the initial scan as running.
    pub fn start(&mut self) {
        let favorites = self.store.load();
        self.library.initialize(Vec::new(), favorites);
        self.scanning = true;
        self.status = "Scanning for audio files...".to_string();
    }

    /// Merge a finished scan into the library.
    pub fn apply_scan(&mut self, outcome: ScanOutcome) {
        self.scanning = false;
        let added = self.library.extend_all(outcome.files);
        self.status = if outcome.cancelled {
            format!("Scan cancelled, {} audio files so far", self.library.len_all())
        } else {
            format!(
                "Found {} audio files ({} new) in {}",
                self.library.len_all(),
                added,
                outcome.root.display()
            )
        };
        self.clamp_selection();
    }

    /// Periodic housekeeping between frames.
    pub fn tick(&mut self) {
        if let Some(t) = self.player.poll_finished() {
            self.status = t.status_text();
        }
    }

    pub fn dispatch(&mut self, cmd: Command) -> Flow {
        log::debug!("command: {cmd:?}");
        match cmd {
            Command::Quit => return Flow::Quit,
            Command::Rescan => {
                if self.scanning {
                    self.status = "A scan is already running".to_string();
                } else {
                    self.scanning = true;
                    self.status = format!("Rescanning {}...", self.root.display());
                    return Flow::StartScan;
                }
            }
            Command::FocusNext => self.focus = self.focus.other(),
            Command::Focus(pane) => self.focus = pane,
            Command::Select { pane, index } => {
                self.focus = pane;
                self.set_selected(pane, index);
            }
            Command::SelectNext => self.step(true),
            Command::SelectPrev => self.step(false),
            Command::SelectFirst => self.set_selected(self.focus, 0),
            Command::SelectLast => {
                let last = self.pane_len(self.focus).saturating_sub(1);
                self.set_selected(self.focus, last);
            }
            Command::Play => {
                let r = self.player.play();
                self.report(r);
            }
            Command::Pause => {
                let r = self.player.pause();
                self.report(r);
            }
            Command::PlayPause => {
                let r = if self.player.status() == PlaybackStatus::Playing {
                    self.player.pause()
                } else {
                    self.player.play()
                };
                self.report(r);
            }
            Command::Stop => {
                let r = self.player.stop();
                self.report(r);
            }
            Command::Activate => self.activate(),
            Command::Favorite => self.favorite(),
            Command::Unfavorite => self.unfavorite(),
            Command::RemoveFromAll => self.remove_from_all(),
            Command::RemoveSelected => match self.focus {
                Pane::All => self.remove_from_all(),
                Pane::Favorites => self.unfavorite(),
            },
            Command::SaveFavorites => self.save_favorites(),
        }
        Flow::Continue
    }

    /// Release audio and write favorites. Only the first call saves.
    pub fn shutdown(&mut self) -> Result<()> {
        self.player.release();
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;
        self.store.save(self.library.list_favorites())
    }

    fn set_selected(&mut self, pane: Pane, index: usize) {
        let clamped = index.min(self.pane_len(pane).saturating_sub(1));
        match pane {
            Pane::All => self.selected_all = clamped,
            Pane::Favorites => self.selected_favorite = clamped,
        }
    }

    /// Move the cursor in the focused list, wrapping at both ends.
    fn step(&mut self, forward: bool) {
        let len = self.pane_len(self.focus);
        if len == 0 {
            return;
        }
        let cur = self.selected(self.focus).min(len - 1);
        let next = if forward {
            (cur + 1) % len
        } else if cur == 0 {
            len - 1
        } else {
            cur - 1
        };
        self.set_selected(self.focus, next);
    }

    fn clamp_selection(&mut self) {
        self.set_selected(Pane::All, self.selected_all);
        self.set_selected(Pane::Favorites, self.selected_favorite);
    }

    /// The focused row, addressed for `collection`: by index when that list
    /// is focused, by path otherwise.
    fn selection_target(&self, collection: Pane) -> Option<Target> {
        let file = self.selected_file()?;
        Some(if self.focus == collection {
            Target::Index(self.selected(collection))
        } else {
            Target::from(file)
        })
    }

    fn report(&mut self, result: Result<Transition>) {
        match result {
            Ok(t) => self.status = t.status_text(),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, err: Error) {
        self.status = match &err {
            Error::NothingSelected => "Nothing selected".to_string(),
            Error::NothingLoaded => "Nothing loaded: press Enter on a song first".to_string(),
            Error::AlreadyFavorite(name) => format!("Already in favorites: {name}"),
            Error::NotFound(Collection::Favorites) => "Selected song is not a favorite".to_string(),
            Error::NotFound(Collection::All) => "Selected song is not in All Songs".to_string(),
            Error::InvalidState { action, state } => format!("Cannot {action} while {state}"),
            Error::Io { .. } | Error::UnsupportedFormat { .. } | Error::Output(_) => {
                log::warn!("{err}");
                format!("Error: {err}")
            }
        };
    }

    fn activate(&mut self) {
        let Some(file) = self.selected_file().cloned() else {
            return self.fail(Error::NothingSelected);
        };
        match self.player.load_and_play(&file) {
            Ok(t) => self.status = t.status_text(),
            Err(e) => self.status = format!("Error playing {}: {e}", file.display_name()),
        }
    }

    fn favorite(&mut self) {
        let file = self.selected_file().cloned();
        match self.library.add_favorite(file.as_ref()) {
            Ok(()) => {
                let name = file.as_ref().map_or("", |f| f.display_name());
                self.status = format!("Added to favorites: {name}");
                self.persist_if_needed();
            }
            Err(e) => self.fail(e),
        }
    }

    fn unfavorite(&mut self) {
        let Some(target) = self.selection_target(Pane::Favorites) else {
            return self.fail(Error::NothingSelected);
        };
        match self.library.remove_favorite(target) {
            Ok(file) => {
                self.status = format!("Removed from favorites: {}", file.display_name());
                self.clamp_selection();
                self.persist_if_needed();
            }
            Err(e) => self.fail(e),
        }
    }

    fn remove_from_all(&mut self) {
        let Some(target) = self.selection_target(Pane::All) else {
            return self.fail(Error::NothingSelected);
        };
        match self.library.remove_from_all(target) {
            Ok(removal) => {
                let name = removal.file.display_name();
                self.status = if removal.was_favorite {
                    format!("Removed from All Songs and favorites: {name}")
                } else {
                    format!("Removed from All Songs: {name}")
                };
                self.clamp_selection();
                if removal.was_favorite {
                    self.persist_if_needed();
                }
            }
            Err(e) => self.fail(e),
        }
    }

    fn save_favorites(&mut self) {
        match self.store.save(self.library.list_favorites()) {
            Ok(()) => {
                self.status = format!(
                    "Saved {} favorites to {}",
                    self.library.len_favorites(),
                    self.store.path().display()
                );
            }
            Err(e) => {
                log::error!("saving favorites failed: {e}");
                self.status = format!("Failed to save favorites: {e}");
            }
        }
    }

    fn persist_if_needed(&mut self) {
        if !self.save_on_change {
            return;
        }
        if let Err(e) = self.store.save(self.library.list_favorites()) {
            log::error!("saving favorites failed: {e}");
            self.status.push_str(&format!(" (save failed: {e})"));
        }
    }
}
