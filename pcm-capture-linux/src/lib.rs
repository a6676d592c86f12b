//! # pcm-capture-linux
//!
//! Linux ALSA backend for pcm-capture-kit.
//!
//! Talks to raw PCM nodes under `/dev/snd` through the kernel ioctl ABI —
//! no alsa-lib, no configuration layer, just the character devices.
//!
//! Provides:
//! - `PcmStream` — one PCM device handle with the open/configure/prepare/
//!   start/drop lifecycle
//! - `InterleavedCaptureStream` — capture stream delivering raw interleaved
//!   frames via `FrameReader`
//! - `DeviceEnumerator` — snapshot of the PCM devices present in `/dev/snd`
//! - `params` — encoding of `PcmConfig` into the kernel hw/sw parameter blocks
//!
//! ## Usage
//! ```ignore
//! use pcm_capture_core::{FrameReader, PcmConfig};
//! use pcm_capture_linux::InterleavedCaptureStream;
//!
//! let mut mic = InterleavedCaptureStream::new();
//! mic.open(0, 0, false)?;
//! mic.setup(&PcmConfig::default())?;
//! mic.prepare()?;
//! mic.start()?;
//! let mut frames = vec![0u8; 1024 * 4];
//! let read = mic.read_unformatted(&mut frames, 1024)?;
//! ```

#[cfg(target_os = "linux")]
pub mod capture;
#[cfg(target_os = "linux")]
pub mod device_enumerator;
#[cfg(target_os = "linux")]
pub mod device_name;
#[cfg(target_os = "linux")]
pub mod info;
#[cfg(target_os = "linux")]
pub mod ioctl;
#[cfg(target_os = "linux")]
pub mod params;
#[cfg(target_os = "linux")]
pub mod stream;

#[cfg(target_os = "linux")]
pub use capture::InterleavedCaptureStream;
#[cfg(target_os = "linux")]
pub use device_enumerator::DeviceEnumerator;
#[cfg(target_os = "linux")]
pub use device_name::PcmDeviceName;
#[cfg(target_os = "linux")]
pub use stream::PcmStream;
