use std::path::Path;

use crate::error::Result;

/// Decoding and output, as seen by the playback controller.
///
/// A handle stands for one opened file. Offsets are in microseconds from the
/// start of the file.
pub trait AudioBackend {
    type Handle;

    /// Open and validate `path` without producing any sound.
    fn open(&mut self, path: &Path) -> Result<Self::Handle>;

    /// Begin output at `from_micros`, replacing any output already running
    /// for this handle.
    fn start(&mut self, handle: &mut Self::Handle, from_micros: u64) -> Result<()>;

    /// Silence the handle. Calling it on a stopped handle is a no-op.
    fn stop(&mut self, handle: &mut Self::Handle);

    /// Current offset of the running output, or where it was stopped.
    fn position_micros(&self, handle: &Self::Handle) -> u64;

    /// Output ran off the end of the file.
    fn is_finished(&self, _handle: &Self::Handle) -> bool {
        false
    }

    /// Release everything held for the handle.
    fn close(&mut self, handle: Self::Handle);
}
