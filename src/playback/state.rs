use std::fmt;

/// The playback state of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    /// Capitalized name, as MPRIS and the status line expect it.
    pub fn label(self) -> &'static str {
        match self {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
        })
    }
}

/// Reported after every successful transition so the presentation layer can
/// refresh its status text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub status: PlaybackStatus,
    /// Display name of the current file.
    pub title: Option<String>,
}

impl Transition {
    pub fn status_text(&self) -> String {
        match (&self.status, self.title.as_deref()) {
            (PlaybackStatus::Playing, Some(t)) => format!("Playing: {t}"),
            (PlaybackStatus::Paused, Some(t)) => format!("Paused: {t}"),
            (PlaybackStatus::Stopped, Some(t)) => format!("Stopped: {t}"),
            (status, None) => status.label().to_string(),
        }
    }
}
