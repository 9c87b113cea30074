//! Election lifecycle derivation against an explicit time source.

use std::sync::Arc;

use tally_chain::Clock;
use tally_types::{ElectionState, ElectionWindow, Timestamp};

use crate::error::SessionError;

/// Derives the election's lifecycle state from the configured window and
/// the current instant, and validates window configurations before any
/// write is issued.
pub struct ElectionClock {
    clock: Arc<dyn Clock>,
}

impl ElectionClock {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Validate a window configuration. Fails with
    /// [`SessionError::InvalidWindow`] before any network call; the
    /// contract write only happens for a window that passed this check.
    pub fn validate(starts_at: Timestamp, ends_at: Timestamp) -> Result<ElectionWindow, SessionError> {
        ElectionWindow::new(starts_at, ends_at).map_err(|_| SessionError::InvalidWindow)
    }

    /// The lifecycle state right now. Pure given the window; re-derived on
    /// every refresh rather than cached.
    pub fn state_of(&self, window: Option<&ElectionWindow>) -> ElectionState {
        ElectionWindow::state_at(window, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_inverted_window() {
        let result = ElectionClock::validate(Timestamp::new(200), Timestamp::new(100));
        assert!(matches!(result, Err(SessionError::InvalidWindow)));
    }

    #[test]
    fn validate_accepts_ordered_window() {
        let w = ElectionClock::validate(Timestamp::new(100), Timestamp::new(200)).unwrap();
        assert_eq!(w.starts_at, Timestamp::new(100));
        assert_eq!(w.ends_at, Timestamp::new(200));
    }
}
