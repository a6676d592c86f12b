//! Decoding of the raw kernel device-info block into `DeviceInfo`.

use nix::libc;

use pcm_capture_core::models::device_info::{DeviceInfo, PcmClass, PcmSubclass};

use crate::ioctl::{
    SndPcmInfo, SNDRV_PCM_CLASS_DIGITIZER, SNDRV_PCM_CLASS_GENERIC, SNDRV_PCM_CLASS_MODEM,
    SNDRV_PCM_CLASS_MULTI, SNDRV_PCM_SUBCLASS_GENERIC_MIX, SNDRV_PCM_SUBCLASS_MULTI_MIX,
};

/// Unrecognized codes decode to `Unknown`, never an error.
fn decode_class(raw: libc::c_int) -> PcmClass {
    match raw {
        SNDRV_PCM_CLASS_GENERIC => PcmClass::Generic,
        SNDRV_PCM_CLASS_MULTI => PcmClass::MultiChannel,
        SNDRV_PCM_CLASS_MODEM => PcmClass::Modem,
        SNDRV_PCM_CLASS_DIGITIZER => PcmClass::Digitizer,
        _ => PcmClass::Unknown,
    }
}

fn decode_subclass(raw: libc::c_int) -> PcmSubclass {
    match raw {
        SNDRV_PCM_SUBCLASS_GENERIC_MIX => PcmSubclass::GenericMix,
        SNDRV_PCM_SUBCLASS_MULTI_MIX => PcmSubclass::MultiChannelMix,
        _ => PcmSubclass::Unknown,
    }
}

/// The kernel fills fixed-size byte arrays; take everything up to the first
/// NUL (or the whole buffer when unterminated) and lossy-decode it.
fn name_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Normalize a raw info block into the value-type snapshot record.
pub fn decode_info(raw: &SndPcmInfo) -> DeviceInfo {
    DeviceInfo {
        card: raw.card,
        device: raw.device,
        subdevice: raw.subdevice,
        class: decode_class(raw.dev_class),
        subclass: decode_subclass(raw.dev_subclass),
        id: name_field(&raw.id),
        name: name_field(&raw.name),
        subname: name_field(&raw.subname),
        subdevices_count: raw.subdevices_count,
        subdevices_available: raw.subdevices_avail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_name(name: &[u8]) -> SndPcmInfo {
        let mut raw = SndPcmInfo::zeroed();
        raw.name[..name.len()].copy_from_slice(name);
        raw
    }

    #[test]
    fn decodes_known_classes() {
        let mut raw = SndPcmInfo::zeroed();
        raw.dev_class = SNDRV_PCM_CLASS_MULTI;
        raw.dev_subclass = SNDRV_PCM_SUBCLASS_MULTI_MIX;

        let info = decode_info(&raw);
        assert_eq!(info.class, PcmClass::MultiChannel);
        assert_eq!(info.subclass, PcmSubclass::MultiChannelMix);
    }

    #[test]
    fn unrecognized_codes_become_unknown() {
        let mut raw = SndPcmInfo::zeroed();
        raw.dev_class = 99;
        raw.dev_subclass = -1;

        let info = decode_info(&raw);
        assert_eq!(info.class, PcmClass::Unknown);
        assert_eq!(info.subclass, PcmSubclass::Unknown);
    }

    #[test]
    fn name_stops_at_nul() {
        let raw = raw_with_name(b"HDA Intel PCH\0garbage");
        assert_eq!(decode_info(&raw).name, "HDA Intel PCH");
    }

    #[test]
    fn unterminated_name_takes_whole_buffer() {
        let mut raw = SndPcmInfo::zeroed();
        raw.subname.fill(b'x');
        assert_eq!(decode_info(&raw).subname.len(), raw.subname.len());
    }

    #[test]
    fn numeric_fields_pass_through() {
        let mut raw = SndPcmInfo::zeroed();
        raw.card = 1;
        raw.device = 3;
        raw.subdevice = 2;
        raw.subdevices_count = 4;
        raw.subdevices_avail = 1;

        let info = decode_info(&raw);
        assert_eq!(info.card, 1);
        assert_eq!(info.device, 3);
        assert_eq!(info.subdevice, 2);
        assert_eq!(info.subdevices_count, 4);
        assert_eq!(info.subdevices_available, 1);
    }
}
