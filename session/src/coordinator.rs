//! Orchestrates wallet, binding, registry, guard and clock into the
//! operations the UI layer invokes.

use std::sync::Arc;

use tokio::sync::watch;

use tally_chain::{Clock, ElectionBinder, ElectionContract, ElectionHandle, WalletProvider};
use tally_types::{AccountAddress, CandidateId, Timestamp};

use crate::clock::ElectionClock;
use crate::error::SessionError;
use crate::guard::VoteGuard;
use crate::registry::CandidateRegistry;
use crate::snapshot::{SessionPhase, Snapshot, SnapshotField};
use crate::wallet::WalletSession;

/// The election session coordinator.
///
/// Lifecycle: `Start → Connecting → Connected → Bound → Ready`, with
/// `Failed` reachable from any step. A failed attempt halts; there is no
/// automatic retry, and a later `start` call begins again from scratch.
///
/// Every transition publishes a fresh [`Snapshot`] on a watch channel; the
/// UI collaborator renders snapshots and calls back into the operations
/// below. Publishing to a dropped receiver is a no-op, so in-flight
/// operations stay safe against a torn-down consumer.
pub struct SessionCoordinator {
    provider: Arc<dyn WalletProvider>,
    binder: Arc<dyn ElectionBinder>,
    clock: ElectionClock,
    session: Option<WalletSession>,
    handle: Option<ElectionHandle>,
    contract: Option<Arc<dyn ElectionContract>>,
    registry: Option<CandidateRegistry>,
    guard: Option<VoteGuard>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl SessionCoordinator {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        binder: Arc<dyn ElectionBinder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::initial());
        Self {
            provider,
            binder,
            clock: ElectionClock::new(clock),
            session: None,
            handle: None,
            contract: None,
            registry: None,
            guard: None,
            snapshot_tx,
        }
    }

    /// Subscribe to snapshot updates. Each transition publishes once.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.snapshot_tx.borrow().phase.clone()
    }

    /// Handle to the bound contract instance, once `start` has bound one.
    pub fn handle(&self) -> Option<&ElectionHandle> {
        self.handle.as_ref()
    }

    /// Establish the session: connect the wallet, bind the contract, and
    /// run the initial read batch.
    ///
    /// A connect or bind failure is terminal for this attempt. Failures in
    /// the initial reads are not: each is isolated per field and the
    /// session still reaches `Ready` with partial data.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        self.reset();
        self.set_phase(SessionPhase::Connecting);

        let session = match WalletSession::connect(self.provider.as_ref()).await {
            Ok(session) => session,
            Err(err) => return Err(self.fail("connect", err)),
        };
        let account = session.account.clone();
        self.session = Some(session);
        self.update(|s| {
            s.phase = SessionPhase::Connected;
            s.account = Some(account);
        });

        let (handle, contract) = match self.binder.bind().await {
            Ok(bound) => bound,
            Err(err) => return Err(self.fail("bind", err.into())),
        };
        self.handle = Some(handle);
        self.registry = Some(CandidateRegistry::new(contract.clone()));
        self.guard = Some(VoteGuard::new(contract.clone()));
        self.contract = Some(contract);
        self.set_phase(SessionPhase::Bound);

        let snapshot = self.run_read_batch().await?;
        self.snapshot_tx.send_replace(snapshot);
        tracing::info!("session ready");
        Ok(())
    }

    /// Re-run the read batch and replace the snapshot wholesale.
    ///
    /// Idempotent: with no intervening writes, two refreshes observe the
    /// same contract state.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        self.require_ready("refresh")?;
        let snapshot = self.run_read_batch().await?;
        self.snapshot_tx.send_replace(snapshot);
        Ok(())
    }

    /// Register a candidate, then re-read the authoritative list.
    pub async fn register_candidate(
        &mut self,
        name: &str,
        party: &str,
    ) -> Result<(), SessionError> {
        self.require_ready("register_candidate")?;
        let result = {
            let (registry, _, account) = self.components("register_candidate")?;
            registry.register(&account, name, party).await
        };
        self.finish_write("register_candidate", result).await
    }

    /// Configure the election window.
    ///
    /// Validation failures surface immediately with no contract write. A
    /// rejected transaction leaves no optimistic local state behind: the
    /// window shown is always the contract's.
    pub async fn configure_window(
        &mut self,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<(), SessionError> {
        self.require_ready("configure_window")?;
        let window = match ElectionClock::validate(starts_at, ends_at) {
            Ok(window) => window,
            Err(err) => return Err(self.record_op_error("configure_window", err)),
        };
        let result = {
            let contract = self
                .contract
                .as_ref()
                .ok_or(SessionError::NotReady {
                    operation: "configure_window",
                })?
                .clone();
            let account = self.active_account("configure_window")?;
            contract
                .set_dates(&account, window)
                .await
                .map_err(SessionError::from)
        };
        self.finish_write("configure_window", result).await
    }

    /// Cast a vote for the selected candidate.
    pub async fn cast_vote(&mut self, selection: Option<CandidateId>) -> Result<(), SessionError> {
        self.require_ready("cast_vote")?;
        let result = {
            let (_, guard, account) = self.components("cast_vote")?;
            guard.cast_vote(&account, selection).await
        };
        self.finish_write("cast_vote", result).await
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn reset(&mut self) {
        self.session = None;
        self.handle = None;
        self.contract = None;
        self.registry = None;
        self.guard = None;
        self.snapshot_tx.send_replace(Snapshot::initial());
    }

    fn require_ready(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.snapshot_tx.borrow().phase == SessionPhase::Ready {
            Ok(())
        } else {
            Err(SessionError::NotReady { operation })
        }
    }

    fn components(
        &self,
        operation: &'static str,
    ) -> Result<(&CandidateRegistry, &VoteGuard, AccountAddress), SessionError> {
        let registry = self
            .registry
            .as_ref()
            .ok_or(SessionError::NotReady { operation })?;
        let guard = self
            .guard
            .as_ref()
            .ok_or(SessionError::NotReady { operation })?;
        let account = self.active_account(operation)?;
        Ok((registry, guard, account))
    }

    fn active_account(
        &self,
        operation: &'static str,
    ) -> Result<AccountAddress, SessionError> {
        self.session
            .as_ref()
            .filter(|s| s.connected)
            .map(|s| s.account.clone())
            .ok_or(SessionError::NotReady { operation })
    }

    /// Run the three independent reads concurrently and assemble a fresh
    /// `Ready` snapshot. No ordering is guaranteed between the reads; each
    /// writes a disjoint slice of the snapshot, and each failure is
    /// isolated per field.
    async fn run_read_batch(&self) -> Result<Snapshot, SessionError> {
        let registry = self.registry.as_ref().ok_or(SessionError::NotReady {
            operation: "refresh",
        })?;
        let guard = self.guard.as_ref().ok_or(SessionError::NotReady {
            operation: "refresh",
        })?;
        let contract = self.contract.as_ref().ok_or(SessionError::NotReady {
            operation: "refresh",
        })?;
        let account = self.active_account("refresh")?;

        let (list, dates, voted) = tokio::join!(
            registry.list(),
            contract.get_dates(),
            guard.has_voted(&account),
        );

        let mut snapshot = Snapshot {
            phase: SessionPhase::Ready,
            account: Some(account),
            ..Snapshot::initial()
        };

        match list {
            Ok(list) => {
                snapshot.candidates = list.candidates;
                snapshot.candidate_failures = list.failures;
            }
            Err(err) => snapshot.record_read_failure(SnapshotField::Candidates, err),
        }

        match dates {
            Ok(window) => snapshot.window = window,
            Err(err) => snapshot.record_read_failure(SnapshotField::Window, err),
        }

        match voted {
            Ok(voted) => snapshot.has_voted = Some(voted),
            Err(err) => snapshot.record_read_failure(SnapshotField::HasVoted, err),
        }

        snapshot.election_state = self.clock.state_of(snapshot.window.as_ref());
        Ok(snapshot)
    }

    /// Surface a write outcome: a success triggers a wholesale refresh so
    /// the snapshot reflects the contract's new state; a failure is
    /// recorded and reported, never retried.
    async fn finish_write(
        &mut self,
        operation: &'static str,
        result: Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(()) => {
                let snapshot = self.run_read_batch().await?;
                self.snapshot_tx.send_replace(snapshot);
                Ok(())
            }
            Err(err) => Err(self.record_op_error(operation, err)),
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        self.update(|s| s.phase = phase);
    }

    fn update(&mut self, mutate: impl FnOnce(&mut Snapshot)) {
        let mut snapshot = self.snapshot_tx.borrow().clone();
        mutate(&mut snapshot);
        self.snapshot_tx.send_replace(snapshot);
    }

    /// Record a failed operation in the snapshot so the UI can show it,
    /// and hand the error back to the caller. The coordinator stays in its
    /// last good state.
    fn record_op_error(&mut self, operation: &'static str, err: SessionError) -> SessionError {
        tracing::error!(operation, error = %err, "operation failed");
        self.update(|s| s.last_error = Some(err.to_string()));
        err
    }

    /// Terminal failure of a `start` attempt.
    fn fail(&mut self, step: &'static str, err: SessionError) -> SessionError {
        tracing::error!(step, error = %err, "session start failed");
        self.update(|s| {
            s.phase = SessionPhase::Failed {
                reason: err.to_string(),
            };
            s.last_error = Some(err.to_string());
        });
        err
    }
}
