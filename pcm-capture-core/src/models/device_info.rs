use std::fmt;

use serde::{Deserialize, Serialize};

/// Device class reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcmClass {
    /// Placeholder for codes this library does not recognize.
    Unknown,
    /// A generic mono or stereo device.
    Generic,
    /// A multi-channel device.
    MultiChannel,
    /// A software modem.
    Modem,
    /// A digitizer.
    Digitizer,
}

impl fmt::Display for PcmClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unknown => "Unknown",
            Self::Generic => "Generic",
            Self::MultiChannel => "Multi-channel",
            Self::Modem => "Modem",
            Self::Digitizer => "Digitizer",
        };
        f.write_str(text)
    }
}

/// Device subclass reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcmSubclass {
    /// Placeholder for codes this library does not recognize.
    Unknown,
    /// Mono or stereo subdevices are mixed together.
    GenericMix,
    /// Multi-channel subdevices are mixed together.
    MultiChannelMix,
}

impl fmt::Display for PcmSubclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unknown => "Unknown",
            Self::GenericMix => "Generic Mix",
            Self::MultiChannelMix => "Multi-channel Mix",
        };
        f.write_str(text)
    }
}

/// Snapshot of a PCM device's identity, as reported by the driver at one
/// point in time.
///
/// Pure data: holds no descriptor and stays valid after the device it
/// describes disappears. Name fields are truncated to the fixed-size buffers
/// of the kernel info block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub card: i32,
    pub device: u32,
    pub subdevice: u32,
    pub class: PcmClass,
    pub subclass: PcmSubclass,
    /// User-selectable card identifier.
    pub id: String,
    /// Device name.
    pub name: String,
    /// Subdevice name.
    pub subname: String,
    pub subdevices_count: u32,
    pub subdevices_available: u32,
}
