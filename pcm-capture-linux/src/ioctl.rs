//! Kernel PCM ioctl ABI: wire-layout parameter blocks and control calls.
//!
//! The structs here are byte-compatible with the `sound/asound.h` uapi
//! definitions the driver expects. Layout changes are ABI breaks, not
//! refactors.

use nix::libc;

/// Number of 32-bit words in one kernel parameter bitmask (256 bits).
pub const SNDRV_MASK_WORDS: usize = 8;

// Hardware parameter identifiers. Masks and intervals live in two separate
// index spaces inside `SndPcmHwParams`.
pub const SNDRV_PCM_HW_PARAM_ACCESS: usize = 0;
pub const SNDRV_PCM_HW_PARAM_FORMAT: usize = 1;
pub const SNDRV_PCM_HW_PARAM_SUBFORMAT: usize = 2;
pub const SNDRV_PCM_HW_PARAM_FIRST_MASK: usize = SNDRV_PCM_HW_PARAM_ACCESS;
pub const SNDRV_PCM_HW_PARAM_LAST_MASK: usize = SNDRV_PCM_HW_PARAM_SUBFORMAT;

pub const SNDRV_PCM_HW_PARAM_SAMPLE_BITS: usize = 8;
pub const SNDRV_PCM_HW_PARAM_CHANNELS: usize = 10;
pub const SNDRV_PCM_HW_PARAM_RATE: usize = 11;
pub const SNDRV_PCM_HW_PARAM_PERIOD_SIZE: usize = 13;
pub const SNDRV_PCM_HW_PARAM_PERIODS: usize = 15;
pub const SNDRV_PCM_HW_PARAM_TICK_TIME: usize = 19;
pub const SNDRV_PCM_HW_PARAM_FIRST_INTERVAL: usize = SNDRV_PCM_HW_PARAM_SAMPLE_BITS;
pub const SNDRV_PCM_HW_PARAM_LAST_INTERVAL: usize = SNDRV_PCM_HW_PARAM_TICK_TIME;

pub const MASK_PARAM_COUNT: usize =
    SNDRV_PCM_HW_PARAM_LAST_MASK - SNDRV_PCM_HW_PARAM_FIRST_MASK + 1;
pub const INTERVAL_PARAM_COUNT: usize =
    SNDRV_PCM_HW_PARAM_LAST_INTERVAL - SNDRV_PCM_HW_PARAM_FIRST_INTERVAL + 1;

// snd_interval flag bits.
pub const SNDRV_INTERVAL_OPENMIN: u32 = 1 << 0;
pub const SNDRV_INTERVAL_OPENMAX: u32 = 1 << 1;
pub const SNDRV_INTERVAL_INTEGER: u32 = 1 << 2;
pub const SNDRV_INTERVAL_EMPTY: u32 = 1 << 3;

// Access-mode codes (bit positions in the access mask).
pub const SNDRV_PCM_ACCESS_MMAP_INTERLEAVED: u32 = 0;
pub const SNDRV_PCM_ACCESS_MMAP_NONINTERLEAVED: u32 = 1;
pub const SNDRV_PCM_ACCESS_RW_INTERLEAVED: u32 = 3;
pub const SNDRV_PCM_ACCESS_RW_NONINTERLEAVED: u32 = 4;

// Device class and subclass codes in `SndPcmInfo`.
pub const SNDRV_PCM_CLASS_GENERIC: libc::c_int = 0;
pub const SNDRV_PCM_CLASS_MULTI: libc::c_int = 1;
pub const SNDRV_PCM_CLASS_MODEM: libc::c_int = 2;
pub const SNDRV_PCM_CLASS_DIGITIZER: libc::c_int = 3;

pub const SNDRV_PCM_SUBCLASS_GENERIC_MIX: libc::c_int = 0;
pub const SNDRV_PCM_SUBCLASS_MULTI_MIX: libc::c_int = 1;

/// A discrete-valued parameter: a bitset of allowed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SndMask {
    pub bits: [u32; SNDRV_MASK_WORDS],
}

impl SndMask {
    pub const fn zeroed() -> Self {
        Self { bits: [0; SNDRV_MASK_WORDS] }
    }

    /// All codes allowed.
    pub const fn filled() -> Self {
        Self { bits: [!0; SNDRV_MASK_WORDS] }
    }

    /// Clear every bit, then allow exactly `code`.
    pub fn collapse_to(&mut self, code: u32) {
        self.bits = [0; SNDRV_MASK_WORDS];
        self.bits[(code / 32) as usize] |= 1 << (code % 32);
    }

    pub fn popcount(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_set(&self, code: u32) -> bool {
        self.bits[(code / 32) as usize] & (1 << (code % 32)) != 0
    }
}

/// A range-valued parameter, expressed as a min/max interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SndInterval {
    pub min: u32,
    pub max: u32,
    /// Bitfield: openmin, openmax, integer, empty.
    pub flags: u32,
}

impl SndInterval {
    /// Any value allowed.
    pub const fn unconstrained() -> Self {
        Self { min: 0, max: !0, flags: 0 }
    }

    /// Pin the interval to a single integer value.
    pub fn collapse_to(&mut self, value: u32) {
        self.min = value;
        self.max = value;
        self.flags = SNDRV_INTERVAL_INTEGER;
    }
}

/// `struct snd_pcm_hw_params`: the hardware-parameter ioctl block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct SndPcmHwParams {
    pub flags: u32,
    pub masks: [SndMask; MASK_PARAM_COUNT],
    pub mres: [SndMask; 5],
    pub intervals: [SndInterval; INTERVAL_PARAM_COUNT],
    pub ires: [SndInterval; 9],
    /// W: parameters the caller asks the driver to consider.
    pub rmask: u32,
    /// R: parameters the driver changed.
    pub cmask: u32,
    pub info: u32,
    pub msbits: u32,
    pub rate_num: u32,
    pub rate_den: u32,
    pub fifo_size: libc::c_ulong,
    pub reserved: [u8; 64],
}

impl SndPcmHwParams {
    /// Fully permissive template: every mask fully set, every interval open
    /// up to the type maximum, every parameter requested.
    pub fn any() -> Self {
        Self {
            flags: 0,
            masks: [SndMask::filled(); MASK_PARAM_COUNT],
            mres: [SndMask::zeroed(); 5],
            intervals: [SndInterval::unconstrained(); INTERVAL_PARAM_COUNT],
            ires: [SndInterval::unconstrained(); 9],
            rmask: !0,
            cmask: 0,
            info: !0,
            msbits: 0,
            rate_num: 0,
            rate_den: 0,
            fifo_size: 0,
            reserved: [0; 64],
        }
    }

    pub fn mask(&self, param: usize) -> &SndMask {
        &self.masks[param - SNDRV_PCM_HW_PARAM_FIRST_MASK]
    }

    pub fn mask_mut(&mut self, param: usize) -> &mut SndMask {
        &mut self.masks[param - SNDRV_PCM_HW_PARAM_FIRST_MASK]
    }

    pub fn interval(&self, param: usize) -> &SndInterval {
        &self.intervals[param - SNDRV_PCM_HW_PARAM_FIRST_INTERVAL]
    }

    pub fn interval_mut(&mut self, param: usize) -> &mut SndInterval {
        &mut self.intervals[param - SNDRV_PCM_HW_PARAM_FIRST_INTERVAL]
    }
}

/// `struct snd_pcm_sw_params`: the software-parameter ioctl block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct SndPcmSwParams {
    pub tstamp_mode: libc::c_int,
    pub period_step: u32,
    pub sleep_min: u32,
    pub avail_min: libc::c_ulong,
    pub xfer_align: libc::c_ulong,
    pub start_threshold: libc::c_ulong,
    pub stop_threshold: libc::c_ulong,
    pub silence_threshold: libc::c_ulong,
    pub silence_size: libc::c_ulong,
    pub boundary: libc::c_ulong,
    pub proto: u32,
    pub tstamp_type: u32,
    pub reserved: [u8; 56],
}

impl SndPcmSwParams {
    pub const fn zeroed() -> Self {
        Self {
            tstamp_mode: 0,
            period_step: 0,
            sleep_min: 0,
            avail_min: 0,
            xfer_align: 0,
            start_threshold: 0,
            stop_threshold: 0,
            silence_threshold: 0,
            silence_size: 0,
            boundary: 0,
            proto: 0,
            tstamp_type: 0,
            reserved: [0; 56],
        }
    }
}

/// `struct snd_pcm_info`: the raw device-info ioctl block.
#[derive(Debug, Clone)]
#[repr(C)]
pub struct SndPcmInfo {
    pub device: u32,
    pub subdevice: u32,
    pub stream: libc::c_int,
    pub card: libc::c_int,
    pub id: [u8; 64],
    pub name: [u8; 80],
    pub subname: [u8; 32],
    pub dev_class: libc::c_int,
    pub dev_subclass: libc::c_int,
    pub subdevices_count: u32,
    pub subdevices_avail: u32,
    /// Hardware synchronization id (opaque here).
    pub sync: [u8; 16],
    pub reserved: [u8; 64],
}

impl SndPcmInfo {
    pub const fn zeroed() -> Self {
        Self {
            device: 0,
            subdevice: 0,
            stream: 0,
            card: 0,
            id: [0; 64],
            name: [0; 80],
            subname: [0; 32],
            dev_class: 0,
            dev_subclass: 0,
            subdevices_count: 0,
            subdevices_avail: 0,
            sync: [0; 16],
            reserved: [0; 64],
        }
    }
}

/// `struct snd_xferi`: one interleaved read or write transfer.
#[derive(Debug)]
#[repr(C)]
pub struct SndXferI {
    pub result: libc::c_long,
    pub buf: *mut libc::c_void,
    pub frames: libc::c_ulong,
}

const SNDRV_PCM_IOCTL_MAGIC: u8 = b'A';
const SNDRV_PCM_IOCTL_INFO_NR: u8 = 0x01;
const SNDRV_PCM_IOCTL_HW_PARAMS_NR: u8 = 0x11;
const SNDRV_PCM_IOCTL_SW_PARAMS_NR: u8 = 0x13;
const SNDRV_PCM_IOCTL_PREPARE_NR: u8 = 0x40;
const SNDRV_PCM_IOCTL_START_NR: u8 = 0x42;
const SNDRV_PCM_IOCTL_DROP_NR: u8 = 0x43;
const SNDRV_PCM_IOCTL_READI_FRAMES_NR: u8 = 0x51;

nix::ioctl_read!(pcm_info, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_INFO_NR, SndPcmInfo);
nix::ioctl_readwrite!(
    pcm_hw_params,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_HW_PARAMS_NR,
    SndPcmHwParams
);
nix::ioctl_readwrite!(
    pcm_sw_params,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_SW_PARAMS_NR,
    SndPcmSwParams
);
nix::ioctl_none!(pcm_prepare, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_PREPARE_NR);
nix::ioctl_none!(pcm_start, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_START_NR);
nix::ioctl_none!(pcm_drop, SNDRV_PCM_IOCTL_MAGIC, SNDRV_PCM_IOCTL_DROP_NR);
nix::ioctl_read!(
    pcm_readi_frames,
    SNDRV_PCM_IOCTL_MAGIC,
    SNDRV_PCM_IOCTL_READI_FRAMES_NR,
    SndXferI
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_collapse_selects_one_bit() {
        let mut mask = SndMask::filled();
        assert_eq!(mask.popcount(), 256);

        mask.collapse_to(35);
        assert_eq!(mask.popcount(), 1);
        assert!(mask.is_set(35));
        assert!(!mask.is_set(34));
        assert_eq!(mask.bits[1], 1 << 3);
    }

    #[test]
    fn interval_collapse_pins_and_marks_integer() {
        let mut interval = SndInterval::unconstrained();
        assert_eq!(interval.max, u32::MAX);

        interval.collapse_to(48000);
        assert_eq!(interval.min, 48000);
        assert_eq!(interval.max, 48000);
        assert_eq!(interval.flags, SNDRV_INTERVAL_INTEGER);
    }

    #[test]
    fn hw_params_block_matches_kernel_layout() {
        // 1 flag word + 8 masks of 8 words + 21 intervals of 3 words
        // + 6 trailing words + fifo_size + 64 reserved bytes.
        let words = 1 + 8 * SNDRV_MASK_WORDS + 21 * 3 + 6;
        let expected = words * 4 + std::mem::size_of::<libc::c_ulong>() + 64;
        assert_eq!(std::mem::size_of::<SndPcmHwParams>(), expected);
    }

    #[test]
    fn info_block_matches_kernel_layout() {
        assert_eq!(std::mem::size_of::<SndPcmInfo>(), 4 * 4 + 64 + 80 + 32 + 4 * 4 + 16 + 64);
    }
}
