//! Play/pause/stop state machine over an `AudioBackend`.

use crate::audio::AudioBackend;
use crate::error::{Error, Result};
use crate::library::AudioFileRef;

use super::state::{PlaybackStatus, Transition};

pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    current: Option<AudioFileRef>,
    handle: Option<B::Handle>,
    status: PlaybackStatus,
    position_micros: u64,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            handle: None,
            status: PlaybackStatus::Stopped,
            position_micros: 0,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current(&self) -> Option<&AudioFileRef> {
        self.current.as_ref()
    }

    /// Live offset while playing, the recorded resume offset otherwise.
    pub fn position_micros(&self) -> u64 {
        match (self.status, self.handle.as_ref()) {
            (PlaybackStatus::Playing, Some(h)) => self.backend.position_micros(h),
            _ => self.position_micros,
        }
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn transition(&self) -> Transition {
        Transition {
            status: self.status,
            title: self.current.as_ref().map(|f| f.display_name().to_string()),
        }
    }

    /// Drop the current file and its backend resources.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            self.backend.stop(&mut handle);
            self.backend.close(handle);
        }
        self.current = None;
        self.status = PlaybackStatus::Stopped;
        self.position_micros = 0;
    }

    /// Bind to `file`, stopped at offset zero.
    ///
    /// Whatever was loaded before is released first, so a failed open leaves
    /// nothing loaded.
    pub fn load(&mut self, file: &AudioFileRef) -> Result<Transition> {
        self.release();
        match self.backend.open(file.path()) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.current = Some(file.clone());
                log::info!("loaded {}", file.path().display());
                Ok(self.transition())
            }
            Err(e) => {
                log::warn!("failed to load {}: {e}", file.path().display());
                Err(e)
            }
        }
    }

    pub fn load_and_play(&mut self, file: &AudioFileRef) -> Result<Transition> {
        self.load(file)?;
        self.play()
    }

    /// Stopped/Paused -> Playing from the recorded offset. A no-op while playing.
    pub fn play(&mut self) -> Result<Transition> {
        let handle = self.handle.as_mut().ok_or(Error::NothingLoaded)?;
        if self.status != PlaybackStatus::Playing {
            self.backend.start(handle, self.position_micros)?;
            self.status = PlaybackStatus::Playing;
            log::debug!("playing from {}us", self.position_micros);
        }
        Ok(self.transition())
    }

    /// Playing -> Paused, remembering where output was.
    pub fn pause(&mut self) -> Result<Transition> {
        let handle = self.handle.as_mut().ok_or(Error::NothingLoaded)?;
        if self.status != PlaybackStatus::Playing {
            return Err(Error::InvalidState {
                action: "pause",
                state: self.status,
            });
        }
        self.position_micros = self.backend.position_micros(handle);
        self.backend.stop(handle);
        self.status = PlaybackStatus::Paused;
        log::debug!("paused at {}us", self.position_micros);
        Ok(self.transition())
    }

    /// Playing/Paused -> Stopped, rewinding to the start.
    pub fn stop(&mut self) -> Result<Transition> {
        let handle = self.handle.as_mut().ok_or(Error::NothingLoaded)?;
        if self.status == PlaybackStatus::Playing {
            self.backend.stop(handle);
        }
        self.status = PlaybackStatus::Stopped;
        self.position_micros = 0;
        Ok(self.transition())
    }

    /// Move to Stopped once the backend has played the file to its end.
    pub fn poll_finished(&mut self) -> Option<Transition> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        let handle = self.handle.as_mut()?;
        if !self.backend.is_finished(handle) {
            return None;
        }
        self.backend.stop(handle);
        self.status = PlaybackStatus::Stopped;
        self.position_micros = 0;
        log::debug!("playback reached the end");
        Some(self.transition())
    }
}
