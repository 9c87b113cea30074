//! Election lifecycle state, derived from the window and the current time.

use serde::{Deserialize, Serialize};

/// Where the election is in its lifecycle.
///
/// The variant order is meaningful: for a fixed window the state only ever
/// moves forward through `Pending → Open → Closed` as time advances, and
/// the derived `Ord` follows that progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElectionState {
    /// No window has been configured yet.
    Unconfigured,
    /// A window is set but voting has not started.
    Pending,
    /// Voting is active.
    Open,
    /// The window has ended.
    Closed,
}

impl ElectionState {
    /// Whether votes (and, by the same rule, candidate registrations) are
    /// currently accepted. The contract is the authoritative enforcer; this
    /// mirror exists so the UI can avoid obviously doomed transactions.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, Self::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_accepts_votes() {
        assert!(!ElectionState::Unconfigured.accepts_votes());
        assert!(!ElectionState::Pending.accepts_votes());
        assert!(ElectionState::Open.accepts_votes());
        assert!(!ElectionState::Closed.accepts_votes());
    }

    #[test]
    fn progression_order() {
        assert!(ElectionState::Pending < ElectionState::Open);
        assert!(ElectionState::Open < ElectionState::Closed);
    }
}
