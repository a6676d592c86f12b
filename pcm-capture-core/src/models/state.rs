/// PCM stream lifecycle state machine.
///
/// State transitions:
/// ```text
/// closed → open → configured → prepared → running
///    ↑                 ↑___________________|  (drop discards buffered audio)
///    |_____________________________________|  (close, from any state)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No descriptor is held.
    Closed,
    /// The device node is open but no parameters have been applied.
    Open,
    /// Hardware and software parameters are installed.
    Configured,
    /// The driver is ready for the stream to start.
    Prepared,
    /// Frames are being transferred.
    Running,
}

impl StreamState {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether a descriptor is held in this state.
    pub fn has_descriptor(self) -> bool {
        !self.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(StreamState::Closed.is_closed());
        assert!(!StreamState::Closed.has_descriptor());
        assert!(StreamState::Open.has_descriptor());
        assert!(StreamState::Running.is_running());
        assert!(!StreamState::Prepared.is_running());
    }
}
