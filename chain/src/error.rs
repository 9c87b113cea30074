use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("no wallet provider endpoint configured")]
    ProviderUnavailable,

    #[error("no election contract deployed on the connected network")]
    NotDeployed,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out during {action}")]
    Timeout { action: String },

    #[error("node RPC error: {0}")]
    Rpc(String),

    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("transaction exceeds the gas ceiling: {0}")]
    GasLimitExceeded(String),

    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}

impl ChainError {
    /// Classify an error string reported by the node into a typed error.
    ///
    /// Reverts keep their reason verbatim so callers can distinguish the
    /// contract's specific rejections (already voted, voting not active).
    pub fn classify_node_error(action: &str, message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("revert") {
            let reason = message
                .split_once("revert")
                .map(|(_, tail)| tail.trim_start_matches([':', ' ']).trim())
                .filter(|tail| !tail.is_empty())
                .unwrap_or(message)
                .to_string();
            Self::Reverted { reason }
        } else if lower.contains("gas") {
            Self::GasLimitExceeded(message.to_string())
        } else {
            Self::Rpc(format!("{action}: {message}"))
        }
    }

    /// Classify a transport-level failure from the HTTP client.
    pub fn from_transport(action: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                action: action.to_string(),
            }
        } else {
            Self::Transport(format!("{action}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_messages_keep_their_reason() {
        let err = ChainError::classify_node_error("vote", "execution reverted: already voted");
        match err {
            ChainError::Reverted { reason } => assert_eq!(reason, "already voted"),
            other => panic!("expected revert, got {other:?}"),
        }
    }

    #[test]
    fn bare_revert_keeps_full_message() {
        let err = ChainError::classify_node_error("vote", "revert");
        match err {
            ChainError::Reverted { reason } => assert_eq!(reason, "revert"),
            other => panic!("expected revert, got {other:?}"),
        }
    }

    #[test]
    fn gas_messages_classify_as_gas_limit() {
        let err =
            ChainError::classify_node_error("add_candidate", "transaction exceeds block gas limit");
        assert!(matches!(err, ChainError::GasLimitExceeded(_)));
    }

    #[test]
    fn other_messages_classify_as_rpc() {
        let err = ChainError::classify_node_error("get_dates", "method not found");
        assert!(matches!(err, ChainError::Rpc(_)));
    }
}
