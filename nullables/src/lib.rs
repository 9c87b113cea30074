//! Nullable infrastructure for deterministic testing.
//!
//! The session core's external dependencies (clock, wallet provider,
//! election contract) are abstracted behind traits in `tally-chain`. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (advance time, inject failures)
//! - Never touch the network
//!
//! Usage: swap the real implementations for nullables in tests.

pub mod clock;
pub mod election;
pub mod provider;

pub use clock::NullClock;
pub use election::{NullBinder, NullElection};
pub use provider::NullWalletProvider;
