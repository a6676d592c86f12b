use serde::{Deserialize, Serialize};

use super::format::SampleFormat;

/// Configuration for a PCM stream.
///
/// Immutable once handed to a backend; the parameter encoder never mutates
/// it. Threshold fields left at zero mean "derive from the period geometry
/// and stream direction".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmConfig {
    /// Number of samples per frame (default: 2 for stereo).
    pub channels: u32,

    /// Frames per second (default: 48000).
    pub rate: u32,

    /// Frames in one period (default: 1024).
    pub period_size: u32,

    /// Total number of periods (default: 2).
    pub period_count: u32,

    /// Encoding of one sample (default: signed 16-bit little-endian).
    pub format: SampleFormat,

    /// Frames to buffer before the driver starts transferring.
    /// Zero derives a direction-dependent default.
    pub start_threshold: u32,

    /// Buffered-frame level at which the driver stops transferring.
    /// Zero derives a direction-dependent default.
    pub stop_threshold: u32,

    /// Buffered-frame level at which the driver substitutes silence.
    pub silence_threshold: u32,
}

impl PcmConfig {
    /// Bytes occupied by one interleaved frame under this configuration.
    pub fn frame_bytes(&self) -> u32 {
        self.channels * self.format.bytes_per_sample()
    }

    /// Frames in the whole device buffer.
    pub fn buffer_frames(&self) -> u32 {
        self.period_size * self.period_count
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.channels == 0 {
            return Err("channel count must be non-zero".into());
        }
        if self.rate == 0 {
            return Err("sample rate must be non-zero".into());
        }
        if self.period_size == 0 {
            return Err("period size must be non-zero".into());
        }
        if self.period_count == 0 {
            return Err("period count must be non-zero".into());
        }
        Ok(())
    }
}

impl Default for PcmConfig {
    fn default() -> Self {
        Self {
            channels: 2,
            rate: 48000,
            period_size: 1024,
            period_count: 2,
            format: SampleFormat::S16Le,
            start_threshold: 0,
            stop_threshold: 0,
            silence_threshold: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PcmConfig::default();
        assert_eq!(config.channels, 2);
        assert_eq!(config.rate, 48000);
        assert_eq!(config.period_size, 1024);
        assert_eq!(config.period_count, 2);
        assert_eq!(config.format, SampleFormat::S16Le);
        assert_eq!(config.start_threshold, 0);
        assert_eq!(config.stop_threshold, 0);
        assert_eq!(config.silence_threshold, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn frame_geometry() {
        let config = PcmConfig::default();
        assert_eq!(config.frame_bytes(), 4); // stereo s16
        assert_eq!(config.buffer_frames(), 2048);

        let mono24 = PcmConfig {
            channels: 1,
            format: SampleFormat::S24_3Le,
            ..PcmConfig::default()
        };
        assert_eq!(mono24.frame_bytes(), 3);
    }

    #[test]
    fn validate_rejects_zero_fields() {
        for broken in [
            PcmConfig { channels: 0, ..PcmConfig::default() },
            PcmConfig { rate: 0, ..PcmConfig::default() },
            PcmConfig { period_size: 0, ..PcmConfig::default() },
            PcmConfig { period_count: 0, ..PcmConfig::default() },
        ] {
            assert!(broken.validate().is_err());
        }
    }
}
