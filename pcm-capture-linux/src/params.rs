//! Parameter codec: translates a `PcmConfig` into the two kernel parameter
//! blocks installed at setup time.
//!
//! Pure arithmetic and table lookup; nothing here can fail. No range
//! negotiation is attempted — every parameter the caller fixes is collapsed
//! to that single value before the block reaches the driver.

use pcm_capture_core::models::config::PcmConfig;
use pcm_capture_core::models::format::{Direction, SampleAccess, SampleFormat};

use crate::ioctl::{
    SndPcmHwParams, SndPcmSwParams, SNDRV_PCM_ACCESS_MMAP_INTERLEAVED,
    SNDRV_PCM_ACCESS_MMAP_NONINTERLEAVED, SNDRV_PCM_ACCESS_RW_INTERLEAVED,
    SNDRV_PCM_ACCESS_RW_NONINTERLEAVED, SNDRV_PCM_HW_PARAM_ACCESS, SNDRV_PCM_HW_PARAM_CHANNELS,
    SNDRV_PCM_HW_PARAM_FORMAT, SNDRV_PCM_HW_PARAM_PERIODS, SNDRV_PCM_HW_PARAM_PERIOD_SIZE,
    SNDRV_PCM_HW_PARAM_RATE,
};

/// Kernel format code for a sample encoding.
///
/// Total over the closed `SampleFormat` set; must stay in sync with the
/// `SNDRV_PCM_FORMAT_*` table of the targeted kernel ABI.
pub fn format_code(format: SampleFormat) -> u32 {
    match format {
        SampleFormat::S8 => 0,
        SampleFormat::U8 => 1,
        SampleFormat::S16Le => 2,
        SampleFormat::S16Be => 3,
        SampleFormat::U16Le => 4,
        SampleFormat::U16Be => 5,
        SampleFormat::S24Le => 6,
        SampleFormat::S24Be => 7,
        SampleFormat::U24Le => 8,
        SampleFormat::U24Be => 9,
        SampleFormat::S32Le => 10,
        SampleFormat::S32Be => 11,
        SampleFormat::U32Le => 12,
        SampleFormat::U32Be => 13,
        SampleFormat::S24_3Le => 32,
        SampleFormat::S24_3Be => 33,
        SampleFormat::U24_3Le => 34,
        SampleFormat::U24_3Be => 35,
        SampleFormat::S20_3Le => 36,
        SampleFormat::S20_3Be => 37,
        SampleFormat::U20_3Le => 38,
        SampleFormat::U20_3Be => 39,
        SampleFormat::S18_3Le => 40,
        SampleFormat::S18_3Be => 41,
        SampleFormat::U18_3Le => 42,
        SampleFormat::U18_3Be => 43,
    }
}

/// Kernel access-mode code.
pub fn access_code(access: SampleAccess) -> u32 {
    match access {
        SampleAccess::Interleaved => SNDRV_PCM_ACCESS_RW_INTERLEAVED,
        SampleAccess::NonInterleaved => SNDRV_PCM_ACCESS_RW_NONINTERLEAVED,
        SampleAccess::MmapInterleaved => SNDRV_PCM_ACCESS_MMAP_INTERLEAVED,
        SampleAccess::MmapNonInterleaved => SNDRV_PCM_ACCESS_MMAP_NONINTERLEAVED,
    }
}

/// Build the hardware-parameter block for `config`.
///
/// Starts from the fully permissive template, then collapses the four fixed
/// intervals and the two selected masks.
pub fn encode_hw_params(config: &PcmConfig, access: SampleAccess) -> SndPcmHwParams {
    let mut params = SndPcmHwParams::any();

    let fixed_intervals = [
        (SNDRV_PCM_HW_PARAM_CHANNELS, config.channels),
        (SNDRV_PCM_HW_PARAM_RATE, config.rate),
        (SNDRV_PCM_HW_PARAM_PERIOD_SIZE, config.period_size),
        (SNDRV_PCM_HW_PARAM_PERIODS, config.period_count),
    ];
    for (param, value) in fixed_intervals {
        params.interval_mut(param).collapse_to(value);
    }

    params.mask_mut(SNDRV_PCM_HW_PARAM_FORMAT).collapse_to(format_code(config.format));
    params.mask_mut(SNDRV_PCM_HW_PARAM_ACCESS).collapse_to(access_code(access));

    params
}

/// Build the software-parameter block for `config`.
///
/// Thresholds left at zero derive direction-dependent defaults: capture
/// starts on the first frame and tolerates ten buffers of backlog before
/// stopping, playback waits for half a buffer before starting and stops as
/// soon as a full buffer is pending.
pub fn encode_sw_params(config: &PcmConfig, direction: Direction) -> SndPcmSwParams {
    let buffer = u64::from(config.period_count) * u64::from(config.period_size);

    let start_threshold = if config.start_threshold != 0 {
        u64::from(config.start_threshold)
    } else if direction.is_capture() {
        1
    } else {
        buffer / 2
    };

    let stop_threshold = if config.stop_threshold != 0 {
        u64::from(config.stop_threshold)
    } else if direction.is_capture() {
        buffer * 10
    } else {
        buffer
    };

    let mut params = SndPcmSwParams::zeroed();
    params.period_step = 1;
    params.avail_min = config.period_size as _;
    params.start_threshold = start_threshold as _;
    params.stop_threshold = stop_threshold as _;
    params.boundary = buffer as _;
    params.xfer_align = (config.period_size / 2) as _;
    params.silence_size = 0;
    params.silence_threshold = config.silence_threshold as _;
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::ioctl::SNDRV_INTERVAL_INTEGER;

    #[test]
    fn format_codes_are_bijective() {
        let codes: HashSet<u32> = SampleFormat::ALL.iter().map(|f| format_code(*f)).collect();
        assert_eq!(codes.len(), SampleFormat::ALL.len());

        // Unsigned variants sit two above their signed siblings in both the
        // linear and the packed family.
        assert_eq!(format_code(SampleFormat::U16Le), format_code(SampleFormat::S16Le) + 2);
        assert_eq!(format_code(SampleFormat::U24_3Le), format_code(SampleFormat::S24_3Le) + 2);
    }

    #[test]
    fn hw_block_selects_exactly_one_format_bit() {
        for format in SampleFormat::ALL {
            let config = PcmConfig { format, ..PcmConfig::default() };
            let params = encode_hw_params(&config, SampleAccess::Interleaved);

            let mask = params.mask(SNDRV_PCM_HW_PARAM_FORMAT);
            assert_eq!(mask.popcount(), 1, "{format:?}");
            assert!(mask.is_set(format_code(format)), "{format:?}");
        }
    }

    #[test]
    fn hw_block_collapses_fixed_intervals() {
        let config = PcmConfig { channels: 4, rate: 44100, ..PcmConfig::default() };
        let params = encode_hw_params(&config, SampleAccess::Interleaved);

        for (param, value) in [
            (SNDRV_PCM_HW_PARAM_CHANNELS, 4),
            (SNDRV_PCM_HW_PARAM_RATE, 44100),
            (SNDRV_PCM_HW_PARAM_PERIOD_SIZE, 1024),
            (SNDRV_PCM_HW_PARAM_PERIODS, 2),
        ] {
            let interval = params.interval(param);
            assert_eq!(interval.min, value);
            assert_eq!(interval.max, value);
            assert_eq!(interval.flags, SNDRV_INTERVAL_INTEGER);
        }

        // Unfixed intervals stay open.
        let sample_bits = params.interval(crate::ioctl::SNDRV_PCM_HW_PARAM_SAMPLE_BITS);
        assert_eq!(sample_bits.min, 0);
        assert_eq!(sample_bits.max, u32::MAX);
    }

    #[test]
    fn access_mask_tracks_requested_mode() {
        let config = PcmConfig::default();
        for (access, code) in [
            (SampleAccess::Interleaved, 3),
            (SampleAccess::NonInterleaved, 4),
            (SampleAccess::MmapInterleaved, 0),
            (SampleAccess::MmapNonInterleaved, 1),
        ] {
            let params = encode_hw_params(&config, access);
            let mask = params.mask(SNDRV_PCM_HW_PARAM_ACCESS);
            assert_eq!(mask.popcount(), 1);
            assert!(mask.is_set(code));
        }
    }

    #[test]
    fn derived_start_thresholds() {
        let config = PcmConfig::default(); // period_size 1024, period_count 2

        let capture = encode_sw_params(&config, Direction::Capture);
        assert_eq!(capture.start_threshold, 1);

        let playback = encode_sw_params(&config, Direction::Playback);
        assert_eq!(playback.start_threshold, 1024);
    }

    #[test]
    fn derived_stop_thresholds() {
        let config = PcmConfig::default();

        let capture = encode_sw_params(&config, Direction::Capture);
        assert_eq!(capture.stop_threshold, 20480);

        let playback = encode_sw_params(&config, Direction::Playback);
        assert_eq!(playback.stop_threshold, 2048);
    }

    #[test]
    fn caller_thresholds_win_over_derived() {
        let config = PcmConfig {
            start_threshold: 7,
            stop_threshold: 9,
            silence_threshold: 3,
            ..PcmConfig::default()
        };

        for direction in [Direction::Capture, Direction::Playback] {
            let sw = encode_sw_params(&config, direction);
            assert_eq!(sw.start_threshold, 7);
            assert_eq!(sw.stop_threshold, 9);
            assert_eq!(sw.silence_threshold, 3);
            assert_eq!(sw.silence_size, 0);
        }
    }

    #[test]
    fn sw_block_geometry_fields() {
        let config = PcmConfig::default();
        let sw = encode_sw_params(&config, Direction::Capture);

        assert_eq!(sw.period_step, 1);
        assert_eq!(sw.avail_min, 1024);
        assert_eq!(sw.boundary, 2048);
        assert_eq!(sw.xfer_align, 512);
    }

    #[test]
    fn encoding_is_pure() {
        let config = PcmConfig::default();

        let hw_a = encode_hw_params(&config, SampleAccess::Interleaved);
        let hw_b = encode_hw_params(&config, SampleAccess::Interleaved);
        assert_eq!(hw_a, hw_b);

        let sw_a = encode_sw_params(&config, Direction::Playback);
        let sw_b = encode_sw_params(&config, Direction::Playback);
        assert_eq!(sw_a, sw_b);
    }
}
