//! Interleaved capture stream: a `PcmStream` plus the interleaved-read
//! transfer operation.

use nix::libc;

use pcm_capture_core::models::config::PcmConfig;
use pcm_capture_core::models::device_info::DeviceInfo;
use pcm_capture_core::models::error::PcmError;
use pcm_capture_core::models::format::SampleAccess;
use pcm_capture_core::models::state::StreamState;
use pcm_capture_core::traits::frame_reader::FrameReader;

use crate::ioctl;
use crate::stream::PcmStream;

/// Capture stream delivering raw interleaved frames.
///
/// Composes a `PcmStream`: the lifecycle operations delegate to the inner
/// handle, `setup` pins the access mode to interleaved, and reads go through
/// the interleaved-read ioctl.
#[derive(Debug, Default)]
pub struct InterleavedCaptureStream {
    stream: PcmStream,
}

impl InterleavedCaptureStream {
    pub fn new() -> Self {
        Self { stream: PcmStream::new() }
    }

    /// Open the capture node of `card`/`device`.
    pub fn open(&mut self, card: u32, device: u32, non_blocking: bool) -> Result<(), PcmError> {
        self.stream.open_capture(card, device, non_blocking)
    }

    /// Apply `config` with interleaved access.
    pub fn setup(&mut self, config: &PcmConfig) -> Result<(), PcmError> {
        self.stream.setup(config, SampleAccess::Interleaved)
    }

    pub fn prepare(&mut self) -> Result<(), PcmError> {
        self.stream.prepare()
    }

    pub fn start(&mut self) -> Result<(), PcmError> {
        self.stream.start()
    }

    pub fn drop_frames(&mut self) -> Result<(), PcmError> {
        self.stream.drop_frames()
    }

    pub fn close(&mut self) -> Result<(), PcmError> {
        self.stream.close()
    }

    pub fn info(&self) -> Result<DeviceInfo, PcmError> {
        self.stream.info()
    }

    pub fn state(&self) -> StreamState {
        self.stream.state()
    }

    /// The underlying handle, e.g. for descriptor polling.
    pub fn stream(&self) -> &PcmStream {
        &self.stream
    }
}

impl FrameReader for InterleavedCaptureStream {
    /// Issue one interleaved-read transfer.
    ///
    /// Returns the frame count the driver actually delivered; a partial
    /// transfer is success. The buffer must hold `frame_count` frames of the
    /// configured geometry, so reading requires a prior `setup`.
    fn read_unformatted(&mut self, frames: &mut [u8], frame_count: usize) -> Result<usize, PcmError> {
        let fd = self.stream.raw_fd()?;
        let frame_bytes = self
            .stream
            .config()
            .ok_or(PcmError::NotConfigured)?
            .frame_bytes() as usize;

        // An overflowing product can never fit in an addressable buffer.
        let needed = required_buffer_bytes(frame_count, frame_bytes)
            .unwrap_or(usize::MAX);
        if frames.len() < needed {
            return Err(PcmError::BufferTooSmall { needed, got: frames.len() });
        }

        let mut transfer = ioctl::SndXferI {
            result: 0,
            buf: frames.as_mut_ptr().cast::<libc::c_void>(),
            frames: frame_count as libc::c_ulong,
        };

        match unsafe { ioctl::pcm_readi_frames(fd, &mut transfer) } {
            Ok(_) => Ok(transferred_frames(transfer.result)),
            Err(errno) => Err(PcmError::Os {
                op: "SNDRV_PCM_IOCTL_READI_FRAMES",
                errno: errno as i32,
            }),
        }
    }
}

/// Bytes the caller's buffer must hold for `frame_count` frames; `None` when
/// the product does not fit in `usize`.
fn required_buffer_bytes(frame_count: usize, frame_bytes: usize) -> Option<usize> {
    frame_count.checked_mul(frame_bytes)
}

/// Frame count delivered by a completed transfer block. The driver may
/// fulfil fewer frames than requested; that is still success, and a
/// non-positive count reads as zero frames.
fn transferred_frames(result: libc::c_long) -> usize {
    result.max(0) as usize
}
