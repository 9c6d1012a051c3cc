//! The library: discovered audio files, the favorites subset, and how both
//! are found on disk and persisted.

mod catalog;
mod display;
mod favorites;
mod model;
mod scan;

pub use catalog::{Library, Removal, Target};
pub use display::row_label;
pub use favorites::FavoritesStore;
pub use model::{AudioFileRef, ExtensionSet};
pub use scan::{ScanOutcome, ScanTask, spawn_scan};

#[cfg(test)]
mod tests;
