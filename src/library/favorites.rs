//! Favorites persistence: a text file with one absolute path per line.
//!
//! On unix the lines hold the raw path bytes, so names that are not UTF-8
//! survive a save and load. Elsewhere paths must be valid UTF-8.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::Settings;
use crate::error::{Error, Result};

use super::model::{AudioFileRef, ExtensionSet, resolve_file_path};

#[cfg(unix)]
fn path_bytes(path: &Path) -> io::Result<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> io::Result<&[u8]> {
    path.to_str()
        .map(str::as_bytes)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"))
}

#[cfg(unix)]
fn line_path(line: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(line))
}

#[cfg(not(unix))]
fn line_path(line: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(line).into_owned())
}

pub struct FavoritesStore {
    path: PathBuf,
    extensions: ExtensionSet,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>, extensions: ExtensionSet) -> Self {
        Self {
            path: path.into(),
            extensions,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.favorites.file.clone(),
            ExtensionSet::new(&settings.library.extensions),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the favorites list, keeping only lines that name an existing
    /// audio file. A missing or unreadable file yields an empty list.
    pub fn load(&self) -> Vec<AudioFileRef> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no favorites file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("failed to read favorites {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        let mut favorites: Vec<AudioFileRef> = Vec::new();
        let mut dropped = 0usize;

        for line in bytes.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.trim_ascii().is_empty() {
                continue;
            }
            let path = resolve_file_path(&line_path(line));
            if path.is_file() && self.extensions.matches(&path) {
                favorites.push(AudioFileRef::new(path));
            } else {
                log::debug!("dropping stale favorite {}", path.display());
                dropped += 1;
            }
        }

        log::info!(
            "loaded {} favorites from {} ({} dropped)",
            favorites.len(),
            self.path.display(),
            dropped
        );
        favorites
    }

    /// Replace the favorites file with `favorites`, one absolute path per line.
    /// A path that cannot be written as a single line fails the whole save.
    ///
    /// The list is written to a temporary file next to the target and renamed
    /// over it, so a failed write leaves the previous list intact.
    pub fn save(&self, favorites: &[AudioFileRef]) -> Result<()> {
        let target = std::path::absolute(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
        {
            let mut out = BufWriter::new(&mut tmp);
            for file in favorites {
                let path = std::path::absolute(file.path())
                    .unwrap_or_else(|_| file.path().to_path_buf());
                let line = path_bytes(&path).map_err(|e| Error::io(&path, e))?;
                if line.contains(&b'\n') {
                    let e = io::Error::new(io::ErrorKind::InvalidData, "path contains a newline");
                    return Err(Error::io(&path, e));
                }
                out.write_all(line)
                    .and_then(|()| out.write_all(b"\n"))
                    .map_err(|e| Error::io(&target, e))?;
            }
            out.flush().map_err(|e| Error::io(&target, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| Error::io(&target, e))?;
        tmp.persist(&target).map_err(|e| Error::io(&target, e.error))?;

        log::info!(
            "saved {} favorites to {}",
            favorites.len(),
            target.display()
        );
        Ok(())
    }
}
