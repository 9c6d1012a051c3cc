use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::{AudioFileRef, ExtensionSet, normalize_path};

/// Result of a background scan, delivered to the owner of the library.
#[derive(Debug)]
pub struct ScanOutcome {
    pub root: PathBuf,
    pub files: Vec<AudioFileRef>,
    pub cancelled: bool,
}

/// Handle on a running background scan.
pub struct ScanTask {
    root: PathBuf,
    rx: Receiver<ScanOutcome>,
    cancel: Arc<AtomicBool>,
}

impl ScanTask {
    /// Non-blocking poll for the finished scan. A scan thread that died
    /// without reporting counts as a cancelled scan with no files.
    pub fn try_recv(&self) -> Option<ScanOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("scan of {} ended without a result", self.root.display());
                Some(ScanOutcome {
                    root: self.root.clone(),
                    files: Vec::new(),
                    cancelled: true,
                })
            }
        }
    }

    /// Ask the scan thread to stop at the next directory entry.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.') || has_hidden_attribute(entry)
}

#[cfg(windows)]
fn has_hidden_attribute(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_entry: &DirEntry) -> bool {
    false
}

fn is_playable_file(entry: &DirEntry) -> bool {
    // Without link following, a symlink to a file reports as a symlink.
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Depth-first scan of `dir`, stopping early once `cancel` is set.
///
/// The root is canonicalized so file paths match favorites read from disk.
/// Entries are visited in file-name order. Hidden directories below the root
/// are pruned unless `include_hidden` is set; hidden files are kept. Entries
/// that cannot be read are skipped.
pub fn scan_until(dir: &Path, settings: &LibrarySettings, cancel: &AtomicBool) -> Vec<AudioFileRef> {
    let root = fs::canonicalize(dir).unwrap_or_else(|_| normalize_path(dir));
    let extensions = ExtensionSet::new(&settings.extensions);
    let mut files: Vec<AudioFileRef> = Vec::new();

    let walker = WalkDir::new(&root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    for entry in walker.into_iter().filter_entry(|e| {
        settings.include_hidden || e.depth() == 0 || !e.file_type().is_dir() || !is_hidden(e)
    }) {
        if cancel.load(Ordering::Relaxed) {
            log::info!("scan of {} cancelled after {} files", root.display(), files.len());
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("scan: skipping unreadable entry: {err}");
                continue;
            }
        };

        if is_playable_file(&entry) && extensions.matches(entry.path()) {
            files.push(AudioFileRef::new(entry.into_path()));
        }
    }

    files
}

/// Run [`scan_until`] on a background thread.
pub fn spawn_scan(root: PathBuf, settings: LibrarySettings) -> ScanTask {
    let (tx, rx) = mpsc::channel::<ScanOutcome>();
    let cancel = Arc::new(AtomicBool::new(false));

    let cancel_for_thread = cancel.clone();
    let task_root = root.clone();
    thread::spawn(move || {
        log::info!("scanning {} for {:?}", root.display(), settings.extensions);
        let started = Instant::now();
        let files = scan_until(&root, &settings, &cancel_for_thread);
        let cancelled = cancel_for_thread.load(Ordering::Relaxed);
        log::info!(
            "scan of {} found {} files in {:?}",
            root.display(),
            files.len(),
            started.elapsed()
        );
        // The receiver is gone when the app already shut down.
        let _ = tx.send(ScanOutcome {
            root,
            files,
            cancelled,
        });
    });

    ScanTask {
        root: task_root,
        rx,
        cancel,
    }
}
