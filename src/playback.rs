//! Playback: which file is current, whether it plays, and where to resume.

mod controller;
mod state;

pub use controller::PlaybackController;
pub use state::{PlaybackStatus, Transition};
