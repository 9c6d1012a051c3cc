use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::{Error, Result};

use super::backend::AudioBackend;
use super::sink::{create_sink_at, check_decodable};

/// `AudioBackend` on top of the default rodio output device.
///
/// The device is opened on first use, so a machine without audio output can
/// still browse and edit the library.
#[derive(Default)]
pub struct RodioBackend {
    stream: Option<OutputStream>,
}

/// One opened file. The sink exists only while output is running.
pub struct RodioClip {
    path: PathBuf,
    sink: Option<Sink>,
    offset: Duration,
}

fn open_default_stream() -> Result<OutputStream> {
    let mut stream =
        OutputStreamBuilder::open_default_stream().map_err(|e| Error::Output(e.to_string()))?;
    // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
    // but noisy for a TUI app.
    stream.log_on_drop(false);
    log::info!("opened default audio output");
    Ok(stream)
}

impl RodioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn output(&mut self) -> Result<&OutputStream> {
        let stream = match self.stream.take() {
            Some(s) => s,
            None => open_default_stream()?,
        };
        let stream: &OutputStream = self.stream.insert(stream);
        Ok(stream)
    }
}

pub(super) fn to_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl AudioBackend for RodioBackend {
    type Handle = RodioClip;

    fn open(&mut self, path: &Path) -> Result<RodioClip> {
        check_decodable(path)?;
        self.output()?;
        Ok(RodioClip {
            path: path.to_path_buf(),
            sink: None,
            offset: Duration::ZERO,
        })
    }

    fn start(&mut self, clip: &mut RodioClip, from_micros: u64) -> Result<()> {
        self.stop(clip);
        let offset = Duration::from_micros(from_micros);
        let sink = create_sink_at(self.output()?, &clip.path, offset)?;
        sink.play();
        clip.sink = Some(sink);
        clip.offset = offset;
        Ok(())
    }

    fn stop(&mut self, clip: &mut RodioClip) {
        if let Some(sink) = clip.sink.take() {
            clip.offset += sink.get_pos();
            sink.stop();
        }
    }

    fn position_micros(&self, clip: &RodioClip) -> u64 {
        let played = clip.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos());
        to_micros(clip.offset + played)
    }

    fn is_finished(&self, clip: &RodioClip) -> bool {
        clip.sink.as_ref().is_some_and(|s| s.empty())
    }

    fn close(&mut self, mut clip: RodioClip) {
        self.stop(&mut clip);
    }
}
