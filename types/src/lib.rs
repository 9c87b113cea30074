//! Fundamental types for the tally election client.
//!
//! Everything here is plain data: addresses, instants, candidates, the
//! election window and its derived lifecycle state. No I/O, no async.

pub mod address;
pub mod candidate;
pub mod error;
pub mod state;
pub mod time;
pub mod window;

pub use address::AccountAddress;
pub use candidate::{Candidate, CandidateId};
pub use error::TallyError;
pub use state::ElectionState;
pub use time::Timestamp;
pub use window::ElectionWindow;
