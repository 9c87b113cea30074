//! Shared validation errors for the domain types.

use thiserror::Error;

use crate::time::Timestamp;

/// Common error type for domain-level validation.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid election window: starts_at {starts_at} must precede ends_at {ends_at}")]
    InvalidWindow {
        starts_at: Timestamp,
        ends_at: Timestamp,
    },
}
