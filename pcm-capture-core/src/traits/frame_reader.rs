use crate::models::error::PcmError;

/// Interface for reading raw interleaved frames from a capture stream.
///
/// Implemented by backend capture streams (Linux: `InterleavedCaptureStream`).
pub trait FrameReader {
    /// Read up to `frame_count` frames of unformatted sample data into
    /// `frames`.
    ///
    /// Returns the number of frames the driver actually transferred, which
    /// may be less than requested; a partial transfer is not an error. The
    /// stream must be running with an interleaved access mode — a mismatch
    /// surfaces as an OS-level error from the driver.
    fn read_unformatted(&mut self, frames: &mut [u8], frame_count: usize) -> Result<usize, PcmError>;
}
