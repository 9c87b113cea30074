//! Nullable election contract — the authoritative store, in memory.
//!
//! Mirrors the deployed contract's observable semantics so coordinator
//! tests exercise real rejection paths: dense 1-based candidate ids, the
//! voting window enforced at vote time, candidate id bounds, and one vote
//! per address. Failure injection covers the read paths so partial-result
//! tolerance is testable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tally_chain::{
    CandidateFetch, ChainError, Clock, ElectionBinder, ElectionContract, ElectionHandle,
    DEFAULT_GAS_LIMIT,
};
use tally_types::{AccountAddress, Candidate, CandidateId, ElectionWindow};

/// Address reported for the in-memory contract instance.
pub const NULL_CONTRACT_ADDRESS: &str = "0x00000000000000000000000000000000e1ec0001";

#[derive(Default)]
struct Inner {
    candidates: Vec<Candidate>,
    voters: HashSet<AccountAddress>,
    window: Option<ElectionWindow>,
    write_attempts: u32,
    fail_candidate_reads: HashSet<u32>,
    fail_next_count: bool,
    fail_next_dates: bool,
    fail_next_check_vote: bool,
    reject_next_write: Option<String>,
}

/// In-memory election contract with programmable failures.
pub struct NullElection {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl NullElection {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Make every read of the given candidate fail until cleared.
    pub fn fail_candidate_read(&self, id: u32) {
        self.lock().fail_candidate_reads.insert(id);
    }

    pub fn clear_candidate_read_failures(&self) {
        self.lock().fail_candidate_reads.clear();
    }

    /// Make the next `candidate_count` read fail.
    pub fn fail_next_count_read(&self) {
        self.lock().fail_next_count = true;
    }

    /// Make the next `get_dates` read fail.
    pub fn fail_next_dates_read(&self) {
        self.lock().fail_next_dates = true;
    }

    /// Make the next `check_vote` read fail.
    pub fn fail_next_check_vote(&self) {
        self.lock().fail_next_check_vote = true;
    }

    /// Reject the next write with the given revert reason.
    pub fn reject_next_write(&self, reason: impl Into<String>) {
        self.lock().reject_next_write = Some(reason.into());
    }

    /// How many writes were attempted, including rejected ones. Lets tests
    /// assert that fail-fast validation never reached the contract.
    pub fn write_attempts(&self) -> u32 {
        self.lock().write_attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("null election lock poisoned")
    }

    fn begin_write(inner: &mut Inner) -> Result<(), ChainError> {
        inner.write_attempts += 1;
        if let Some(reason) = inner.reject_next_write.take() {
            return Err(ChainError::Reverted { reason });
        }
        Ok(())
    }
}

#[async_trait]
impl ElectionContract for NullElection {
    async fn candidate_count(&self) -> Result<u32, ChainError> {
        let mut inner = self.lock();
        if inner.fail_next_count {
            inner.fail_next_count = false;
            return Err(ChainError::Rpc("injected count read failure".into()));
        }
        Ok(inner.candidates.len() as u32)
    }

    async fn candidates(&self, offset: u32, limit: u32) -> Result<Vec<CandidateFetch>, ChainError> {
        let inner = self.lock();
        let mut page = Vec::new();
        for id in offset + 1..=offset.saturating_add(limit) {
            let fetched = if inner.fail_candidate_reads.contains(&id) {
                Err(ChainError::Rpc("injected candidate read failure".into()))
            } else {
                match inner.candidates.get(id as usize - 1) {
                    Some(candidate) => Ok(candidate.clone()),
                    None => Err(ChainError::Rpc(format!("no candidate with id {id}"))),
                }
            };
            page.push((CandidateId::new(id), fetched));
        }
        Ok(page)
    }

    async fn add_candidate(
        &self,
        _sender: &AccountAddress,
        name: &str,
        party: &str,
    ) -> Result<(), ChainError> {
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;

        let id = CandidateId::new(inner.candidates.len() as u32 + 1);
        inner.candidates.push(Candidate {
            id,
            name: name.to_string(),
            party: party.to_string(),
            vote_count: 0,
        });
        Ok(())
    }

    async fn set_dates(
        &self,
        _sender: &AccountAddress,
        window: ElectionWindow,
    ) -> Result<(), ChainError> {
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;

        // Reconfiguration overwrites: the contract imposes no guard here,
        // and any account may call this.
        inner.window = Some(window);
        Ok(())
    }

    async fn get_dates(&self) -> Result<Option<ElectionWindow>, ChainError> {
        let mut inner = self.lock();
        if inner.fail_next_dates {
            inner.fail_next_dates = false;
            return Err(ChainError::Rpc("injected dates read failure".into()));
        }
        Ok(inner.window)
    }

    async fn check_vote(&self, account: &AccountAddress) -> Result<bool, ChainError> {
        let mut inner = self.lock();
        if inner.fail_next_check_vote {
            inner.fail_next_check_vote = false;
            return Err(ChainError::Rpc("injected check_vote read failure".into()));
        }
        Ok(inner.voters.contains(account))
    }

    async fn vote(
        &self,
        sender: &AccountAddress,
        candidate: CandidateId,
    ) -> Result<(), ChainError> {
        let now = self.clock.now();
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;

        let open = inner
            .window
            .map(|w| w.starts_at <= now && now < w.ends_at)
            .unwrap_or(false);
        if !open {
            return Err(ChainError::Reverted {
                reason: "voting is not active".into(),
            });
        }

        let index = candidate.as_u32();
        if index == 0 || index as usize > inner.candidates.len() {
            return Err(ChainError::Reverted {
                reason: "invalid candidate".into(),
            });
        }

        if inner.voters.contains(sender) {
            return Err(ChainError::Reverted {
                reason: "already voted".into(),
            });
        }

        inner.voters.insert(sender.clone());
        inner.candidates[index as usize - 1].vote_count += 1;
        Ok(())
    }
}

/// Binder that hands out an in-memory election, or reports none deployed.
pub struct NullBinder {
    election: Option<Arc<NullElection>>,
}

impl NullBinder {
    pub fn new(election: Arc<NullElection>) -> Self {
        Self {
            election: Some(election),
        }
    }

    /// No contract on this network.
    pub fn undeployed() -> Self {
        Self { election: None }
    }
}

#[async_trait]
impl ElectionBinder for NullBinder {
    async fn bind(&self) -> Result<(ElectionHandle, Arc<dyn ElectionContract>), ChainError> {
        let election = self.election.clone().ok_or(ChainError::NotDeployed)?;

        let contract_address = AccountAddress::parse(NULL_CONTRACT_ADDRESS)
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;

        let handle = ElectionHandle {
            contract_address,
            gas_limit: DEFAULT_GAS_LIMIT,
        };
        Ok((handle, election as Arc<dyn ElectionContract>))
    }
}
