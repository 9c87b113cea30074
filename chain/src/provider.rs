//! Wallet provider boundary.

use async_trait::async_trait;
use serde::Deserialize;
use tally_types::AccountAddress;

use crate::client::ChainClient;
use crate::error::ChainError;

/// Local development node endpoint used only when no provider endpoint is
/// configured. Gated behind the `dev-fallback` feature so it cannot reach a
/// production build.
pub const DEV_FALLBACK_ENDPOINT: &str = "http://127.0.0.1:9545";

/// External agent that authorizes account access.
///
/// Returns an ordered list of account addresses; callers adopt element 0 as
/// the active account.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ChainError>;
}

/// Wallet provider backed by the node's `accounts` RPC.
pub struct NodeProvider {
    client: ChainClient,
}

#[derive(Deserialize)]
struct AccountsResult {
    #[serde(default)]
    accounts: Vec<String>,
}

impl NodeProvider {
    pub fn new(client: ChainClient) -> Self {
        Self { client }
    }

    /// Resolve the provider endpoint: the configured one, or the local
    /// development node in `dev-fallback` builds only.
    pub fn resolve_endpoint(configured: Option<&str>) -> Result<String, ChainError> {
        if let Some(url) = configured {
            return Ok(url.to_string());
        }

        #[cfg(feature = "dev-fallback")]
        {
            tracing::warn!(
                endpoint = DEV_FALLBACK_ENDPOINT,
                "no wallet provider configured, falling back to the local development node"
            );
            Ok(DEV_FALLBACK_ENDPOINT.to_string())
        }

        #[cfg(not(feature = "dev-fallback"))]
        Err(ChainError::ProviderUnavailable)
    }
}

#[async_trait]
impl WalletProvider for NodeProvider {
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ChainError> {
        let result = self
            .client
            .rpc_call("accounts", serde_json::json!({}))
            .await?;

        let resp: AccountsResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("accounts: {e}")))?;

        resp.accounts
            .iter()
            .map(|raw| {
                AccountAddress::parse(raw)
                    .map_err(|e| ChainError::InvalidResponse(format!("accounts: {e}")))
            })
            .collect()
    }
}
