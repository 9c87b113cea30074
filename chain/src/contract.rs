//! The election contract boundary.
//!
//! The contract is the authoritative store of candidates, votes and the
//! election window. The client never trusts a local mirror over it: reads
//! go back to the contract, and writes carry an explicit sender so no
//! ambient "current account" leaks between sessions.

use std::sync::Arc;

use async_trait::async_trait;
use tally_types::{AccountAddress, Candidate, CandidateId, ElectionWindow};

use crate::error::ChainError;

/// Gas ceiling applied to every write when none is configured.
pub const DEFAULT_GAS_LIMIT: u64 = 6_654_755;

/// Handle to the one deployed election contract instance this session
/// talks to. Immutable for the session's lifetime once bound.
#[derive(Clone, Debug)]
pub struct ElectionHandle {
    pub contract_address: AccountAddress,
    pub gas_limit: u64,
}

/// One slot of a paginated candidate read.
///
/// Failures are isolated per candidate: a transient read error on one entry
/// must not blank the rest of the page.
pub type CandidateFetch = (CandidateId, Result<Candidate, ChainError>);

#[async_trait]
pub trait ElectionContract: Send + Sync {
    /// Number of registered candidates.
    async fn candidate_count(&self) -> Result<u32, ChainError>;

    /// Fetch up to `limit` candidates starting after `offset` (ids are
    /// 1-based, so `offset = 0` starts at id 1). Per-item failures are
    /// reported in-slot; only a failure to issue the page at all is an
    /// outer error.
    async fn candidates(&self, offset: u32, limit: u32) -> Result<Vec<CandidateFetch>, ChainError>;

    /// Register a candidate. The contract assigns the next dense id.
    async fn add_candidate(
        &self,
        sender: &AccountAddress,
        name: &str,
        party: &str,
    ) -> Result<(), ChainError>;

    /// Configure (or overwrite) the election window.
    async fn set_dates(
        &self,
        sender: &AccountAddress,
        window: ElectionWindow,
    ) -> Result<(), ChainError>;

    /// The configured window, or `None` while unconfigured.
    async fn get_dates(&self) -> Result<Option<ElectionWindow>, ChainError>;

    /// Whether the given account has already voted.
    async fn check_vote(&self, account: &AccountAddress) -> Result<bool, ChainError>;

    /// Cast a vote. The contract reverts on a double vote, an out-of-range
    /// candidate id, or a closed window.
    async fn vote(&self, sender: &AccountAddress, candidate: CandidateId)
        -> Result<(), ChainError>;
}

/// Resolves the deployed election contract on the connected network.
#[async_trait]
pub trait ElectionBinder: Send + Sync {
    async fn bind(&self) -> Result<(ElectionHandle, Arc<dyn ElectionContract>), ChainError>;
}
