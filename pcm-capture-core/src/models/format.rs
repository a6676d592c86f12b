use serde::{Deserialize, Serialize};

/// Sample encoding of a single channel value within a frame.
///
/// Closed set; each variant corresponds to exactly one kernel format code,
/// mapped by the backend. The `_3` variants are packed three-byte layouts,
/// the plain 18/20/24-bit variants occupy four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    S8,
    S16Le,
    S16Be,
    S18_3Le,
    S18_3Be,
    S20_3Le,
    S20_3Be,
    S24_3Le,
    S24_3Be,
    S24Le,
    S24Be,
    S32Le,
    S32Be,
    U8,
    U16Le,
    U16Be,
    U18_3Le,
    U18_3Be,
    U20_3Le,
    U20_3Be,
    U24_3Le,
    U24_3Be,
    U24Le,
    U24Be,
    U32Le,
    U32Be,
}

impl SampleFormat {
    /// Every supported format, in kernel declaration order of the signed and
    /// unsigned families.
    pub const ALL: [SampleFormat; 26] = [
        Self::S8,
        Self::S16Le,
        Self::S16Be,
        Self::S18_3Le,
        Self::S18_3Be,
        Self::S20_3Le,
        Self::S20_3Be,
        Self::S24_3Le,
        Self::S24_3Be,
        Self::S24Le,
        Self::S24Be,
        Self::S32Le,
        Self::S32Be,
        Self::U8,
        Self::U16Le,
        Self::U16Be,
        Self::U18_3Le,
        Self::U18_3Be,
        Self::U20_3Le,
        Self::U20_3Be,
        Self::U24_3Le,
        Self::U24_3Be,
        Self::U24Le,
        Self::U24Be,
        Self::U32Le,
        Self::U32Be,
    ];

    /// Bytes occupied by one sample of this format in an interleaved buffer.
    pub fn bytes_per_sample(self) -> u32 {
        match self {
            Self::S8 | Self::U8 => 1,
            Self::S16Le | Self::S16Be | Self::U16Le | Self::U16Be => 2,
            Self::S18_3Le
            | Self::S18_3Be
            | Self::S20_3Le
            | Self::S20_3Be
            | Self::S24_3Le
            | Self::S24_3Be
            | Self::U18_3Le
            | Self::U18_3Be
            | Self::U20_3Le
            | Self::U20_3Be
            | Self::U24_3Le
            | Self::U24_3Be => 3,
            Self::S24Le | Self::S24Be | Self::S32Le | Self::S32Be => 4,
            Self::U24Le | Self::U24Be | Self::U32Le | Self::U32Be => 4,
        }
    }

    /// Whether samples are two's-complement signed values.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Self::S8
                | Self::S16Le
                | Self::S16Be
                | Self::S18_3Le
                | Self::S18_3Be
                | Self::S20_3Le
                | Self::S20_3Be
                | Self::S24_3Le
                | Self::S24_3Be
                | Self::S24Le
                | Self::S24Be
                | Self::S32Le
                | Self::S32Be
        )
    }
}

/// How sample data is laid out and transferred between host and driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAccess {
    /// Samples of a frame appear next to each other in one buffer.
    Interleaved,
    /// Each channel uses its own buffer.
    NonInterleaved,
    /// Memory-mapped interleaved buffers.
    MmapInterleaved,
    /// Memory-mapped non-interleaved buffers.
    MmapNonInterleaved,
}

/// Stream direction of a PCM device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Capture,
    Playback,
}

impl Direction {
    pub fn is_capture(self) -> bool {
        matches!(self, Self::Capture)
    }

    /// Device-path suffix used under `/dev/snd`.
    pub fn path_suffix(self) -> char {
        match self {
            Self::Capture => 'c',
            Self::Playback => 'p',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_widths() {
        assert_eq!(SampleFormat::S8.bytes_per_sample(), 1);
        assert_eq!(SampleFormat::S16Le.bytes_per_sample(), 2);
        assert_eq!(SampleFormat::S24_3Le.bytes_per_sample(), 3);
        assert_eq!(SampleFormat::S24Le.bytes_per_sample(), 4);
        assert_eq!(SampleFormat::U32Be.bytes_per_sample(), 4);
    }

    #[test]
    fn signedness_splits_families() {
        let signed = SampleFormat::ALL.iter().filter(|f| f.is_signed()).count();
        assert_eq!(signed, 13);
        assert!(SampleFormat::S18_3Be.is_signed());
        assert!(!SampleFormat::U18_3Be.is_signed());
    }

    #[test]
    fn direction_suffixes() {
        assert_eq!(Direction::Capture.path_suffix(), 'c');
        assert_eq!(Direction::Playback.path_suffix(), 'p');
        assert!(Direction::Capture.is_capture());
        assert!(!Direction::Playback.is_capture());
    }
}
