use thiserror::Error;

use tally_chain::ChainError;

use crate::snapshot::SnapshotField;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no wallet provider available")]
    ProviderUnavailable,

    #[error("wallet provider returned no accounts")]
    NoAccount,

    #[error("no election contract deployed on the connected network")]
    ContractNotDeployed,

    #[error("transaction exceeds the gas ceiling: {0}")]
    GasLimitExceeded(String),

    #[error("invalid election window: start must be a valid instant before the end")]
    InvalidWindow,

    #[error("invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("no candidate selected")]
    NoSelection,

    #[error("this account has already voted")]
    AlreadyVoted,

    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("failed to read {field}: {reason}")]
    ReadFailed { field: SnapshotField, reason: String },

    #[error("request timed out during {action}")]
    Timeout { action: String },

    #[error("node error: {0}")]
    Node(String),

    #[error("{operation} requires an active session")]
    NotReady { operation: &'static str },
}

impl From<ChainError> for SessionError {
    /// Classify a boundary failure into the session taxonomy.
    ///
    /// Revert reasons are inspected so the contract's double-vote rejection
    /// surfaces as [`SessionError::AlreadyVoted`] rather than a generic
    /// revert.
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::ProviderUnavailable => Self::ProviderUnavailable,
            ChainError::NotDeployed => Self::ContractNotDeployed,
            ChainError::GasLimitExceeded(message) => Self::GasLimitExceeded(message),
            ChainError::Timeout { action } => Self::Timeout { action },
            ChainError::Reverted { reason } => {
                if reason.to_lowercase().contains("already voted") {
                    Self::AlreadyVoted
                } else {
                    Self::Reverted { reason }
                }
            }
            ChainError::Transport(message)
            | ChainError::Rpc(message)
            | ChainError::InvalidResponse(message) => Self::Node(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_vote_revert_maps_to_already_voted() {
        let err = SessionError::from(ChainError::Reverted {
            reason: "Already voted".into(),
        });
        assert!(matches!(err, SessionError::AlreadyVoted));
    }

    #[test]
    fn other_reverts_stay_reverts() {
        let err = SessionError::from(ChainError::Reverted {
            reason: "voting is not active".into(),
        });
        match err {
            SessionError::Reverted { reason } => assert_eq!(reason, "voting is not active"),
            other => panic!("expected revert, got {other:?}"),
        }
    }

    #[test]
    fn timeout_is_preserved() {
        let err = SessionError::from(ChainError::Timeout {
            action: "vote".into(),
        });
        assert!(matches!(err, SessionError::Timeout { .. }));
    }
}
