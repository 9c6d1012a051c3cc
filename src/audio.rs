//! Audio output: the backend trait the playback controller drives, and its
//! rodio implementation.

mod backend;
mod output;
mod sink;

pub use backend::AudioBackend;
pub use output::RodioBackend;

#[cfg(test)]
pub(crate) mod fake;
