//! Utilities for opening files as `rodio` sources and sinks.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Check that `path` can be opened and its format recognized.
pub(super) fn check_decodable(path: &Path) -> Result<()> {
    decode(path).map(drop)
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(handle: &OutputStream, path: &Path, start_at: Duration) -> Result<Sink> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decode(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
