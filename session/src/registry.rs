//! Client-side view of the contract's candidate registry.

use std::sync::Arc;

use serde::Serialize;
use tally_chain::{ChainError, ElectionContract};
use tally_types::{AccountAddress, Candidate, CandidateId};

use crate::error::SessionError;

/// Page size for candidate list reads.
pub const PAGE_SIZE: u32 = 100;

/// One candidate whose read failed while the rest of the list succeeded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateReadFailure {
    pub id: CandidateId,
    pub reason: String,
}

/// Result of a full list read: the candidates that could be fetched, plus
/// the ids that could not. A transient failure on one entry never blanks
/// the whole table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
    pub failures: Vec<CandidateReadFailure>,
}

/// Read and write access to the authoritative candidate list.
///
/// The registry never appends speculatively: after a successful
/// registration the list is re-read from the contract, because the
/// assigned id and ordering are contract-determined.
pub struct CandidateRegistry {
    contract: Arc<dyn ElectionContract>,
}

impl CandidateRegistry {
    pub fn new(contract: Arc<dyn ElectionContract>) -> Self {
        Self { contract }
    }

    /// Register a candidate.
    ///
    /// Rejects an empty (after trimming) name or party before any network
    /// call is made, so no gas is spent on a registration the contract
    /// would refuse anyway.
    pub async fn register(
        &self,
        sender: &AccountAddress,
        name: &str,
        party: &str,
    ) -> Result<(), SessionError> {
        let name = name.trim();
        let party = party.trim();

        if name.is_empty() {
            return Err(SessionError::InvalidCandidate(
                "name must not be empty".into(),
            ));
        }
        if party.is_empty() {
            return Err(SessionError::InvalidCandidate(
                "party must not be empty".into(),
            ));
        }

        self.contract.add_candidate(sender, name, party).await?;
        tracing::info!(name, party, "candidate registered");
        Ok(())
    }

    /// Fetch the full candidate list in pages.
    ///
    /// The outer `Err` only covers failing to learn the count or to issue a
    /// page at all; individual candidate read failures are collected into
    /// [`CandidateList::failures`] and do not abort the remaining fetches.
    pub async fn list(&self) -> Result<CandidateList, ChainError> {
        let count = self.contract.candidate_count().await?;

        let mut list = CandidateList::default();
        let mut offset = 0;
        while offset < count {
            let limit = PAGE_SIZE.min(count - offset);
            let page = self.contract.candidates(offset, limit).await?;

            for (id, fetched) in page {
                match fetched {
                    Ok(candidate) => list.candidates.push(candidate),
                    Err(err) => {
                        tracing::warn!(candidate = %id, error = %err, "candidate read failed");
                        list.failures.push(CandidateReadFailure {
                            id,
                            reason: err.to_string(),
                        });
                    }
                }
            }
            offset += limit;
        }

        Ok(list)
    }
}
