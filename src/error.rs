//! Error type shared by the library, favorites store and playback controller.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::playback::PlaybackStatus;

/// Which of the two library collections an operation addressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collection {
    All,
    Favorites,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::All => f.write_str("All Songs"),
            Collection::Favorites => f.write_str("Favorites"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem read or write failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The audio backend could not decode the file.
    #[error("unsupported format {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// Removal target is absent from the addressed collection.
    #[error("not found in {0}")]
    NotFound(Collection),

    #[error("already in favorites: {0}")]
    AlreadyFavorite(String),

    #[error("nothing selected")]
    NothingSelected,

    #[error("nothing loaded")]
    NothingLoaded,

    /// Playback transition not valid from the current state.
    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: PlaybackStatus,
    },

    /// No usable audio output device.
    #[error("audio output unavailable: {0}")]
    Output(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
