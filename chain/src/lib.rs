//! External boundaries of the tally client.
//!
//! This crate owns the three collaborators the session core talks to:
//! - the wallet provider (account authorization),
//! - the deployed election contract (authoritative candidates/votes/window),
//! - the clock.
//!
//! Each boundary is a trait so tests can substitute deterministic doubles;
//! the production implementations speak JSON-RPC to a node over HTTP.

pub mod client;
pub mod clock;
pub mod contract;
pub mod error;
pub mod provider;

pub use client::{ChainBinder, ChainClient, ChainElection};
pub use clock::{Clock, SystemClock};
pub use contract::{
    CandidateFetch, ElectionBinder, ElectionContract, ElectionHandle, DEFAULT_GAS_LIMIT,
};
pub use error::ChainError;
pub use provider::{NodeProvider, WalletProvider, DEV_FALLBACK_ENDPOINT};
