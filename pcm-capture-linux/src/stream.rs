//! PCM device handle and lifecycle state machine.
//!
//! A `PcmStream` owns at most one open descriptor for a `/dev/snd` PCM node
//! and walks it through open → configured → prepared → running. Every
//! control operation is a direct blocking ioctl; the non-blocking flag given
//! at open time only affects how the driver treats later read availability.

use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, IntoRawFd, OwnedFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::libc;

use pcm_capture_core::models::config::PcmConfig;
use pcm_capture_core::models::device_info::DeviceInfo;
use pcm_capture_core::models::error::PcmError;
use pcm_capture_core::models::format::{Direction, SampleAccess};
use pcm_capture_core::models::state::StreamState;

use crate::info::decode_info;
use crate::ioctl;
use crate::params::{encode_hw_params, encode_sw_params};

/// Device node path for a card/device pair.
pub fn device_path(card: u32, device: u32, direction: Direction) -> PathBuf {
    PathBuf::from(format!("/dev/snd/pcmC{card}D{device}{}", direction.path_suffix()))
}

/// Handle to one raw PCM device.
///
/// Owns zero or one descriptor; dropping the handle always closes it. The
/// handle is movable but not clonable, so a descriptor never has two owners.
#[derive(Debug)]
pub struct PcmStream {
    fd: Option<OwnedFd>,
    /// Direction of the most recent open. Meaningless while closed.
    direction: Direction,
    state: StreamState,
    config: Option<PcmConfig>,
}

impl PcmStream {
    /// An unopened stream.
    pub fn new() -> Self {
        Self {
            fd: None,
            direction: Direction::Capture,
            state: StreamState::Closed,
            config: None,
        }
    }

    /// Open the capture node of `card`/`device`.
    ///
    /// An already-open stream transparently closes its old descriptor first.
    /// On failure the stream stays closed and the OS error is reported; a
    /// later open may be retried on the same handle.
    pub fn open_capture(&mut self, card: u32, device: u32, non_blocking: bool) -> Result<(), PcmError> {
        self.open_path(&device_path(card, device, Direction::Capture), Direction::Capture, non_blocking)
    }

    /// Open the playback node of `card`/`device`.
    pub fn open_playback(&mut self, card: u32, device: u32, non_blocking: bool) -> Result<(), PcmError> {
        self.open_path(&device_path(card, device, Direction::Playback), Direction::Playback, non_blocking)
    }

    pub(crate) fn open_path(
        &mut self,
        path: &Path,
        direction: Direction,
        non_blocking: bool,
    ) -> Result<(), PcmError> {
        // Lazy reinitialization: release any previous descriptor first.
        self.fd.take();
        self.config = None;
        self.state = StreamState::Closed;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(if non_blocking { libc::O_NONBLOCK } else { 0 })
            .open(path)
            .map_err(|e| PcmError::Os {
                op: "open",
                errno: e.raw_os_error().unwrap_or(libc::EIO),
            })?;

        self.fd = Some(OwnedFd::from(file));
        self.direction = direction;
        self.state = StreamState::Open;
        Ok(())
    }

    /// Install hardware then software parameters for `config`.
    ///
    /// The hardware-parameter ioctl runs first; only if it succeeds is the
    /// software block issued. Either failure leaves the stream open but
    /// unconfigured. Idempotent: re-running with the same config installs
    /// the same two blocks.
    pub fn setup(&mut self, config: &PcmConfig, access: SampleAccess) -> Result<(), PcmError> {
        let fd = self.raw_fd()?;

        let mut hw = encode_hw_params(config, access);
        unsafe { ioctl::pcm_hw_params(fd, &mut hw) }
            .map_err(|e| os_err("SNDRV_PCM_IOCTL_HW_PARAMS", e))?;

        let mut sw = encode_sw_params(config, self.direction);
        unsafe { ioctl::pcm_sw_params(fd, &mut sw) }
            .map_err(|e| os_err("SNDRV_PCM_IOCTL_SW_PARAMS", e))?;

        self.config = Some(config.clone());
        self.state = StreamState::Configured;
        Ok(())
    }

    /// Ready the driver for `start`.
    pub fn prepare(&mut self) -> Result<(), PcmError> {
        let fd = self.raw_fd()?;
        unsafe { ioctl::pcm_prepare(fd) }.map_err(|e| os_err("SNDRV_PCM_IOCTL_PREPARE", e))?;
        self.state = StreamState::Prepared;
        Ok(())
    }

    /// Start the transfer loop: capture streams begin delivering frames,
    /// playback streams begin draining buffered audio.
    pub fn start(&mut self) -> Result<(), PcmError> {
        let fd = self.raw_fd()?;
        unsafe { ioctl::pcm_start(fd) }.map_err(|e| os_err("SNDRV_PCM_IOCTL_START", e))?;
        self.state = StreamState::Running;
        Ok(())
    }

    /// Stop the stream, discarding any buffered audio. Not an error to lose
    /// that data; the stream returns to the configured state.
    pub fn drop_frames(&mut self) -> Result<(), PcmError> {
        let fd = self.raw_fd()?;
        unsafe { ioctl::pcm_drop(fd) }.map_err(|e| os_err("SNDRV_PCM_IOCTL_DROP", e))?;
        self.state = StreamState::Configured;
        Ok(())
    }

    /// Query and decode the device's info block.
    pub fn info(&self) -> Result<DeviceInfo, PcmError> {
        let fd = self.raw_fd()?;
        let mut raw = ioctl::SndPcmInfo::zeroed();
        unsafe { ioctl::pcm_info(fd, &mut raw) }.map_err(|e| os_err("SNDRV_PCM_IOCTL_INFO", e))?;
        Ok(decode_info(&raw))
    }

    /// Release the descriptor. A no-op success on an already-closed stream.
    ///
    /// The descriptor is invalidated even when `close(2)` reports an error.
    pub fn close(&mut self) -> Result<(), PcmError> {
        let Some(fd) = self.fd.take() else {
            return Ok(());
        };
        self.config = None;
        self.state = StreamState::Closed;

        if unsafe { libc::close(fd.into_raw_fd()) } < 0 {
            return Err(os_err("close", Errno::last()));
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.fd.is_some()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Direction of the most recent open; capture for a never-opened stream.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Configuration applied by the last successful `setup`.
    pub fn config(&self) -> Option<&PcmConfig> {
        self.config.as_ref()
    }

    /// The underlying descriptor, for external readiness polling.
    pub fn fd(&self) -> Option<RawFd> {
        self.fd.as_ref().map(AsRawFd::as_raw_fd)
    }

    pub(crate) fn raw_fd(&self) -> Result<RawFd, PcmError> {
        self.fd().ok_or(PcmError::NotOpen)
    }
}

impl Default for PcmStream {
    fn default() -> Self {
        Self::new()
    }
}

fn os_err(op: &'static str, errno: Errno) -> PcmError {
    PcmError::Os { op, errno: errno as i32 }
}
