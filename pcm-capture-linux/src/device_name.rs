//! Parsing of `/dev/snd` PCM entry names.
//!
//! PCM nodes follow the fixed grammar `pcmC<card>D<device><c|p>`; anything
//! else under the directory (control nodes, timers, MIDI) is not a PCM.

use pcm_capture_core::models::format::Direction;

/// Card/device coordinates parsed from a `/dev/snd` entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmDeviceName {
    pub card: u32,
    pub device: u32,
    pub direction: Direction,
}

/// Parse a directory entry name.
///
/// Returns `None` for anything that is not a PCM node; a non-match is not an
/// error, the entry is simply not enumerated. Digit runs are unsigned
/// decimal; realistic card and device counts stay far below overflow.
pub fn parse(name: &str) -> Option<PcmDeviceName> {
    let rest = name.strip_prefix("pcmC")?;

    let device_at = rest.find('D')?;
    let (card_digits, rest) = rest.split_at(device_at);
    let rest = &rest[1..];

    let suffix = rest.chars().last()?;
    let device_digits = &rest[..rest.len() - suffix.len_utf8()];

    let direction = match suffix {
        'c' => Direction::Capture,
        'p' => Direction::Playback,
        _ => return None,
    };

    Some(PcmDeviceName {
        card: parse_decimal(card_digits)?,
        device: parse_decimal(device_digits)?,
        direction,
    })
}

/// Non-empty run of ASCII decimal digits.
fn parse_decimal(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_capture_entry() {
        let parsed = parse("pcmC0D0c").unwrap();
        assert_eq!(parsed.card, 0);
        assert_eq!(parsed.device, 0);
        assert_eq!(parsed.direction, Direction::Capture);
    }

    #[test]
    fn parses_multi_digit_playback_entry() {
        let parsed = parse("pcmC12D3p").unwrap();
        assert_eq!(parsed.card, 12);
        assert_eq!(parsed.device, 3);
        assert_eq!(parsed.direction, Direction::Playback);
    }

    #[test]
    fn rejects_non_pcm_entries() {
        for name in [
            "",
            "pcm",
            "pcmC0D0x",  // wrong suffix
            "pcmC0c",    // missing device part
            "pcmC0D0",   // missing suffix
            "pcmC0D0cc", // trailing characters
            "pcmCxD0c",  // non-digit card
            "pcmC0Dxc",  // non-digit device
            "pcmCD0c",   // empty card digits
            "pcmC0Dc",   // empty device digits
            "controlC0",
            "timer",
            "midiC0D0",
        ] {
            assert_eq!(parse(name), None, "{name:?}");
        }
    }
}
