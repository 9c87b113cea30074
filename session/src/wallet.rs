//! Wallet session establishment.

use tally_chain::WalletProvider;
use tally_types::AccountAddress;

use crate::error::SessionError;

/// The active account identity obtained from the wallet provider.
///
/// Owned exclusively by the session layer; every other component receives
/// the account as an explicit argument instead of reading ambient state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub account: AccountAddress,
    pub connected: bool,
}

impl WalletSession {
    /// Request account access and adopt the first returned account.
    ///
    /// Fails with [`SessionError::NoAccount`] when the provider answers
    /// with an empty list, and [`SessionError::ProviderUnavailable`] when
    /// no provider can be reached at all.
    pub async fn connect(provider: &dyn WalletProvider) -> Result<Self, SessionError> {
        let accounts = provider.request_accounts().await?;

        let account = accounts.into_iter().next().ok_or(SessionError::NoAccount)?;
        tracing::info!(account = %account, "wallet session established");

        Ok(Self {
            account,
            connected: true,
        })
    }

    /// Invalidate the session. The account is kept for display; all
    /// operations require `connected`.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}
