//! The configured election window.

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::state::ElectionState;
use crate::time::Timestamp;

/// A configured start/end pair for the election.
///
/// Construction enforces `starts_at < ends_at` and both instants nonzero
/// (the contract reports an unconfigured window as `(0, 0)`). An absent
/// window is represented as `Option<ElectionWindow>`, never as a sentinel
/// pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionWindow {
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl ElectionWindow {
    pub fn new(starts_at: Timestamp, ends_at: Timestamp) -> Result<Self, TallyError> {
        if starts_at.is_epoch() || ends_at.is_epoch() || starts_at >= ends_at {
            return Err(TallyError::InvalidWindow { starts_at, ends_at });
        }
        Ok(Self { starts_at, ends_at })
    }

    /// Derive the lifecycle state at the given instant.
    ///
    /// `None` means no window is configured. The result is never cached by
    /// callers past a single read; it is re-derived on every refresh.
    pub fn state_at(window: Option<&Self>, now: Timestamp) -> ElectionState {
        match window {
            None => ElectionState::Unconfigured,
            Some(w) if now < w.starts_at => ElectionState::Pending,
            Some(w) if now < w.ends_at => ElectionState::Open,
            Some(_) => ElectionState::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(s: u64, e: u64) -> ElectionWindow {
        ElectionWindow::new(Timestamp::new(s), Timestamp::new(e)).unwrap()
    }

    #[test]
    fn rejects_inverted_and_empty_windows() {
        assert!(ElectionWindow::new(Timestamp::new(200), Timestamp::new(100)).is_err());
        assert!(ElectionWindow::new(Timestamp::new(100), Timestamp::new(100)).is_err());
    }

    #[test]
    fn rejects_unset_sentinels() {
        assert!(ElectionWindow::new(Timestamp::EPOCH, Timestamp::new(100)).is_err());
        assert!(ElectionWindow::new(Timestamp::new(100), Timestamp::EPOCH).is_err());
    }

    #[test]
    fn state_for_missing_window_is_unconfigured() {
        assert_eq!(
            ElectionWindow::state_at(None, Timestamp::new(500)),
            ElectionState::Unconfigured
        );
    }

    #[test]
    fn state_transitions_at_boundaries() {
        let w = window(100, 200);
        assert_eq!(
            ElectionWindow::state_at(Some(&w), Timestamp::new(99)),
            ElectionState::Pending
        );
        // start is inclusive
        assert_eq!(
            ElectionWindow::state_at(Some(&w), Timestamp::new(100)),
            ElectionState::Open
        );
        assert_eq!(
            ElectionWindow::state_at(Some(&w), Timestamp::new(199)),
            ElectionState::Open
        );
        // end is exclusive
        assert_eq!(
            ElectionWindow::state_at(Some(&w), Timestamp::new(200)),
            ElectionState::Closed
        );
    }
}
