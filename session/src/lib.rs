//! Election session coordinator.
//!
//! Provides everything a front-end needs to run one election against one
//! connected account:
//! - Wallet session establishment (account authorization)
//! - Binding to the deployed election contract
//! - Lifecycle derivation (unconfigured → pending → open → closed)
//! - Candidate registration with fail-fast validation
//! - The at-most-one-vote guard
//! - A coordinator that reconciles asynchronous, possibly-failing reads and
//!   writes into a consistent published snapshot
//!
//! The UI layer is a pure consumer: it subscribes to snapshots and invokes
//! the coordinator's operations. All rendering concerns live outside this
//! crate.

pub mod clock;
pub mod coordinator;
pub mod error;
pub mod guard;
pub mod registry;
pub mod snapshot;
pub mod wallet;

pub use clock::ElectionClock;
pub use coordinator::SessionCoordinator;
pub use error::SessionError;
pub use guard::VoteGuard;
pub use registry::{CandidateList, CandidateReadFailure, CandidateRegistry, PAGE_SIZE};
pub use snapshot::{ReadFailure, SessionPhase, Snapshot, SnapshotField};
pub use wallet::WalletSession;
