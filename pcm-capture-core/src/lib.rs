//! # pcm-capture-core
//!
//! Platform-agnostic PCM capture core library.
//!
//! Defines the configuration, sample-format, device-record, and stream-state
//! models shared by all backends. Platform-specific backends (Linux ALSA)
//! implement the actual device I/O and expose raw frame input through the
//! `FrameReader` trait.
//!
//! ## Architecture
//!
//! ```text
//! pcm-capture-core (this crate)
//! ├── traits/   ← FrameReader
//! └── models/   ← PcmConfig, SampleFormat, SampleAccess, Direction,
//!                 DeviceInfo, PcmClass, StreamState, PcmError
//! ```

pub mod models;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::PcmConfig;
pub use models::device_info::{DeviceInfo, PcmClass, PcmSubclass};
pub use models::error::{errno_message, PcmError};
pub use models::format::{Direction, SampleAccess, SampleFormat};
pub use models::state::StreamState;
pub use traits::frame_reader::FrameReader;
