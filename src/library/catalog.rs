use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Collection, Error, Result};

use super::model::AudioFileRef;

/// Addresses one entry of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Position in the addressed collection.
    Index(usize),
    Path(PathBuf),
}

impl From<usize> for Target {
    fn from(i: usize) -> Self {
        Target::Index(i)
    }
}

impl From<&AudioFileRef> for Target {
    fn from(file: &AudioFileRef) -> Self {
        Target::Path(file.path().to_path_buf())
    }
}

/// What `remove_from_all` took out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub file: AudioFileRef,
    /// The file was also dropped from favorites.
    pub was_favorite: bool,
}

/// All discovered files plus the favorites subset.
///
/// Both lists are unique by path. Removing a file from "all" removes it from
/// favorites too; a favorite may still point outside "all" when it was loaded
/// from disk for a file the scan did not see.
#[derive(Debug, Default)]
pub struct Library {
    all: Vec<AudioFileRef>,
    all_paths: HashSet<PathBuf>,
    favorites: Vec<AudioFileRef>,
}

fn dedup(files: Vec<AudioFileRef>) -> Vec<AudioFileRef> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    files
        .into_iter()
        .filter(|f| seen.insert(f.path().to_path_buf()))
        .collect()
}

fn locate(list: &[AudioFileRef], target: &Target) -> Option<usize> {
    match target {
        Target::Index(i) => (*i < list.len()).then_some(*i),
        Target::Path(p) => list.iter().position(|f| f.path() == p),
    }
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both collections, keeping the first occurrence of each path.
    pub fn initialize(&mut self, scanned: Vec<AudioFileRef>, favorites: Vec<AudioFileRef>) {
        self.all = dedup(scanned);
        self.all_paths = self.all.iter().map(|f| f.path().to_path_buf()).collect();
        self.favorites = dedup(favorites);
    }

    /// Append scan results that are not tracked yet. Returns how many were added.
    pub fn extend_all(&mut self, files: Vec<AudioFileRef>) -> usize {
        let before = self.all.len();
        for file in files {
            if self.all_paths.insert(file.path().to_path_buf()) {
                self.all.push(file);
            }
        }
        self.all.len() - before
    }

    pub fn add_favorite(&mut self, file: Option<&AudioFileRef>) -> Result<()> {
        let file = file.ok_or(Error::NothingSelected)?;
        if self.is_favorite(file.path()) {
            return Err(Error::AlreadyFavorite(file.display_name().to_string()));
        }
        self.favorites.push(file.clone());
        Ok(())
    }

    pub fn remove_favorite(&mut self, target: impl Into<Target>) -> Result<AudioFileRef> {
        let idx = locate(&self.favorites, &target.into())
            .ok_or(Error::NotFound(Collection::Favorites))?;
        Ok(self.favorites.remove(idx))
    }

    /// Remove a file from "all", dropping it from favorites as well.
    pub fn remove_from_all(&mut self, target: impl Into<Target>) -> Result<Removal> {
        let idx = locate(&self.all, &target.into()).ok_or(Error::NotFound(Collection::All))?;
        let file = self.all.remove(idx);
        self.all_paths.remove(file.path());

        let was_favorite = match self.favorites.iter().position(|f| f == &file) {
            Some(fi) => {
                self.favorites.remove(fi);
                true
            }
            None => false,
        };

        Ok(Removal { file, was_favorite })
    }

    pub fn list_all(&self) -> &[AudioFileRef] {
        &self.all
    }

    pub fn list_favorites(&self) -> &[AudioFileRef] {
        &self.favorites
    }

    pub fn get_all(&self, index: usize) -> Option<&AudioFileRef> {
        self.all.get(index)
    }

    pub fn get_favorite(&self, index: usize) -> Option<&AudioFileRef> {
        self.favorites.get(index)
    }

    pub fn len_all(&self) -> usize {
        self.all.len()
    }

    pub fn len_favorites(&self) -> usize {
        self.favorites.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.all_paths.contains(path)
    }

    pub fn is_favorite(&self, path: &Path) -> bool {
        self.favorites.iter().any(|f| f.path() == path)
    }

    /// A favorite that is not part of "all" (e.g. outside the scan root).
    pub fn is_orphan(&self, path: &Path) -> bool {
        self.is_favorite(path) && !self.contains(path)
    }
}
