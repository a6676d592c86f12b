use thiserror::Error;

/// Errors reported by PCM stream operations.
///
/// The first three variants are detected locally, before any syscall is
/// issued. `Os` carries the errno of a failed syscall or ioctl verbatim,
/// never reinterpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PcmError {
    /// The handle was never opened, or was already closed.
    #[error("device not open")]
    NotOpen,

    /// The operation needs an applied configuration, but `setup` has not
    /// succeeded on this handle.
    #[error("device not configured")]
    NotConfigured,

    /// The caller's frame buffer cannot hold the requested transfer.
    #[error("frame buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// A syscall or ioctl failed; `errno` is the OS error code, copied
    /// verbatim.
    #[error("{op} failed: {}", errno_message(*errno))]
    Os { op: &'static str, errno: i32 },
}

impl PcmError {
    /// The raw OS error code, if this error came from a failed syscall.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            Self::Os { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}

/// Human-readable description of an OS error code, looked up from the
/// platform's error table. Zero describes success.
pub fn errno_message(errno: i32) -> String {
    if errno == 0 {
        "success".into()
    } else {
        std::io::Error::from_raw_os_error(errno).to_string()
    }
}
