use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

/// A playable file, identified by its path.
///
/// Equality and hashing only look at the path; the display name is derived
/// from it and never changes.
#[derive(Debug, Clone)]
pub struct AudioFileRef {
    path: PathBuf,
    display_name: String,
}

impl AudioFileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, display_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment, e.g. `song1.wav`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl PartialEq for AudioFileRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for AudioFileRef {}

impl Hash for AudioFileRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Accepted audio extensions, normalized to lowercase without the dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: Vec<String>,
}

impl ExtensionSet {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        let mut exts: Vec<String> = Vec::new();
        for e in extensions {
            let e = e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !e.is_empty() && !exts.contains(&e) {
                exts.push(e);
            }
        }
        Self { exts }
    }

    /// Case-insensitive match on the file name's extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.exts.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(&["wav"])
    }
}

/// Absolute form of `path` with `.` and `..` removed without touching the
/// filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for c in abs.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Identity path for a file named in user input: the parent directory is
/// canonicalized, the file name is kept as written. This matches what a scan
/// of a canonical root produces, including for symlinked files.
pub fn resolve_file_path(path: &Path) -> PathBuf {
    let lexical = normalize_path(path);
    let (Some(parent), Some(name)) = (lexical.parent(), lexical.file_name()) else {
        return lexical;
    };
    match fs::canonicalize(parent) {
        Ok(dir) => dir.join(name),
        Err(_) => lexical,
    }
}
