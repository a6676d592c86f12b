//! PCM device enumeration over the `/dev/snd` directory.
//!
//! Scans the sound-device directory, probes every PCM node it can open, and
//! collects the decoded info records into a point-in-time snapshot.

use std::fs;
use std::path::PathBuf;

use pcm_capture_core::models::device_info::DeviceInfo;
use pcm_capture_core::models::format::Direction;

use crate::device_name;
use crate::stream::PcmStream;

/// PCM device enumerator over the sound-device directory.
///
/// Enumeration is best-effort: entries that do not parse as PCM nodes, or
/// that cannot be opened or queried, are skipped. The returned snapshot is
/// stale the moment a device is added or removed; callers needing freshness
/// re-enumerate. Result order follows directory order and is unspecified.
pub struct DeviceEnumerator {
    root: PathBuf,
}

impl DeviceEnumerator {
    pub const DEFAULT_ROOT: &'static str = "/dev/snd";

    /// Enumerator over `/dev/snd`.
    pub fn new() -> Self {
        Self::with_root(Self::DEFAULT_ROOT)
    }

    /// Enumerator over an alternate device directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Snapshot every PCM device, capture and playback.
    pub fn list(&self) -> Vec<DeviceInfo> {
        self.scan(None)
    }

    /// Snapshot capture devices only.
    pub fn list_capture(&self) -> Vec<DeviceInfo> {
        self.scan(Some(Direction::Capture))
    }

    /// Snapshot playback devices only.
    pub fn list_playback(&self) -> Vec<DeviceInfo> {
        self.scan(Some(Direction::Playback))
    }

    fn scan(&self, filter: Option<Direction>) -> Vec<DeviceInfo> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                // Unreadable directory yields an empty snapshot, not an error.
                log::debug!("cannot read {}: {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut infos = Vec::new();

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(parsed) = device_name::parse(name) else {
                continue;
            };
            if filter.is_some_and(|wanted| wanted != parsed.direction) {
                continue;
            }

            // Probe opens are non-blocking so a busy device skips quickly.
            let mut stream = PcmStream::new();
            if let Err(e) = stream.open_path(&entry.path(), parsed.direction, true) {
                log::debug!("skipping {name}: {e}");
                continue;
            }

            let info = match stream.info() {
                Ok(info) => info,
                Err(e) => {
                    log::debug!("skipping {name}: {e}");
                    continue;
                }
            };

            if infos.try_reserve(1).is_err() {
                // Out of memory: return the partial snapshot collected so far.
                log::warn!("device enumeration stopped early: out of memory");
                break;
            }
            infos.push(info);

            // The probe stream drops here, releasing its descriptor before
            // the next entry is examined.
        }

        infos
    }
}

impl Default for DeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}
