//! The at-most-one-vote guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tally_chain::{ChainError, ElectionContract};
use tally_types::{AccountAddress, CandidateId};

use crate::error::SessionError;

/// Enforces the one-vote-per-account invariant on the client side.
///
/// The contract's own rejection of a double vote is the authoritative
/// guard; the local observation is only a short-circuit that avoids
/// submitting an obviously doomed transaction. It can race with a vote
/// from another session, in which case the contract's revert wins and is
/// surfaced as [`SessionError::AlreadyVoted`].
pub struct VoteGuard {
    contract: Arc<dyn ElectionContract>,
    /// Latest authoritative observation, latched to `true` for the rest of
    /// the session once a vote succeeds.
    observed_voted: AtomicBool,
}

impl VoteGuard {
    pub fn new(contract: Arc<dyn ElectionContract>) -> Self {
        Self {
            contract,
            observed_voted: AtomicBool::new(false),
        }
    }

    /// Query the contract's authoritative voted record for the account.
    ///
    /// No locally cached flag is trusted across refreshes; every call goes
    /// back to the contract. A successful read updates the short-circuit
    /// observation.
    pub async fn has_voted(&self, account: &AccountAddress) -> Result<bool, ChainError> {
        let voted = self.contract.check_vote(account).await?;
        self.observed_voted.store(voted, Ordering::Relaxed);
        Ok(voted)
    }

    /// Submit a vote for the selected candidate.
    ///
    /// `None` fails with [`SessionError::NoSelection`] without touching the
    /// network. When the last observation already said "voted", the guard
    /// short-circuits; otherwise it submits optimistically, with no
    /// synchronous re-check before submission, and classifies the
    /// contract's double-vote revert. A successful vote latches the guard
    /// for the rest of the session.
    pub async fn cast_vote(
        &self,
        sender: &AccountAddress,
        selection: Option<CandidateId>,
    ) -> Result<(), SessionError> {
        let candidate = selection.ok_or(SessionError::NoSelection)?;

        if self.observed_voted.load(Ordering::Relaxed) {
            return Err(SessionError::AlreadyVoted);
        }

        self.contract.vote(sender, candidate).await?;

        self.observed_voted.store(true, Ordering::Relaxed);
        tracing::info!(candidate = %candidate, "vote cast");
        Ok(())
    }

    /// Whether the guard is currently latched (the session may not vote).
    pub fn is_latched(&self) -> bool {
        self.observed_voted.load(Ordering::Relaxed)
    }
}
