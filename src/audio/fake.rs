//! In-memory backend for controller and app tests.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::backend::AudioBackend;

#[derive(Default)]
pub struct FakeBackend {
    pub missing: HashSet<PathBuf>,
    pub unsupported: HashSet<PathBuf>,
    /// No output device: every open fails.
    pub no_output: bool,
    /// Simulated progress since the last `start`.
    pub elapsed_micros: u64,
    pub finished: bool,
    pub starts: Vec<(PathBuf, u64)>,
    pub opened: usize,
    pub closed: usize,
}

pub struct FakeHandle {
    path: PathBuf,
    running_from: Option<u64>,
    stopped_at: u64,
}

impl AudioBackend for FakeBackend {
    type Handle = FakeHandle;

    fn open(&mut self, path: &Path) -> Result<FakeHandle> {
        if self.missing.contains(path) {
            return Err(Error::io(path, io::Error::from(io::ErrorKind::NotFound)));
        }
        if self.unsupported.contains(path) {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "not audio".to_string(),
            });
        }
        if self.no_output {
            return Err(Error::Output("no default output device".to_string()));
        }
        self.opened += 1;
        Ok(FakeHandle {
            path: path.to_path_buf(),
            running_from: None,
            stopped_at: 0,
        })
    }

    fn start(&mut self, handle: &mut FakeHandle, from_micros: u64) -> Result<()> {
        self.starts.push((handle.path.clone(), from_micros));
        self.elapsed_micros = 0;
        handle.running_from = Some(from_micros);
        Ok(())
    }

    fn stop(&mut self, handle: &mut FakeHandle) {
        if let Some(from) = handle.running_from.take() {
            handle.stopped_at = from + self.elapsed_micros;
        }
    }

    fn position_micros(&self, handle: &FakeHandle) -> u64 {
        handle
            .running_from
            .map_or(handle.stopped_at, |from| from + self.elapsed_micros)
    }

    fn is_finished(&self, handle: &FakeHandle) -> bool {
        handle.running_from.is_some() && self.finished
    }

    fn close(&mut self, _handle: FakeHandle) {
        self.closed += 1;
    }
}
