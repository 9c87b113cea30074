//! The coordinator's published view of the session.

use serde::Serialize;
use std::fmt;

use tally_types::{AccountAddress, Candidate, ElectionState, ElectionWindow};

use crate::error::SessionError;
use crate::registry::CandidateReadFailure;

/// Where the session is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// No session yet.
    Start,
    /// Wallet authorization in flight.
    Connecting,
    /// An account is active; the contract is not bound yet.
    Connected,
    /// Contract bound; the initial read batch has not completed.
    Bound,
    /// Fully operational. `refresh` and the write operations are available.
    Ready,
    /// The last `start` attempt failed. Terminal per attempt; calling
    /// `start` again retries from scratch.
    Failed { reason: String },
}

/// A snapshot field whose read failed independently of the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SnapshotField {
    Candidates,
    Window,
    HasVoted,
}

impl fmt::Display for SnapshotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Candidates => "candidates",
            Self::Window => "window",
            Self::HasVoted => "has_voted",
        };
        write!(f, "{name}")
    }
}

/// An isolated, non-fatal read failure from the last refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadFailure {
    pub field: SnapshotField,
    pub reason: String,
}

/// The full derived view of the session, republished after every
/// transition and rebuilt wholesale on every refresh; partial updates are
/// never merged incrementally.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub account: Option<AccountAddress>,
    /// Derived from the window and the clock at refresh time; never cached
    /// past one read.
    pub election_state: ElectionState,
    pub window: Option<ElectionWindow>,
    pub candidates: Vec<Candidate>,
    pub candidate_failures: Vec<CandidateReadFailure>,
    /// `None` until the first successful `check_vote` read.
    pub has_voted: Option<bool>,
    pub read_failures: Vec<ReadFailure>,
    pub last_error: Option<String>,
}

impl Snapshot {
    /// Record an isolated read failure for one field. The other fields are
    /// unaffected; the session still counts as usable.
    pub(crate) fn record_read_failure(&mut self, field: SnapshotField, reason: impl fmt::Display) {
        let err = SessionError::ReadFailed {
            field,
            reason: reason.to_string(),
        };
        tracing::warn!(error = %err, "snapshot read failed");
        self.read_failures.push(ReadFailure {
            field,
            reason: reason.to_string(),
        });
    }

    pub fn initial() -> Self {
        Self {
            phase: SessionPhase::Start,
            account: None,
            election_state: ElectionState::Unconfigured,
            window: None,
            candidates: Vec::new(),
            candidate_failures: Vec::new(),
            has_voted: None,
            read_failures: Vec::new(),
            last_error: None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}
