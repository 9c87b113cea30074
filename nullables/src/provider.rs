//! Nullable wallet provider — programmable account authorization.

use async_trait::async_trait;

use tally_chain::{ChainError, WalletProvider};
use tally_types::AccountAddress;

/// A wallet provider that hands out a preconfigured account list.
pub struct NullWalletProvider {
    accounts: Vec<AccountAddress>,
    available: bool,
}

impl NullWalletProvider {
    /// Provider authorizing exactly one account.
    pub fn single(account: AccountAddress) -> Self {
        Self::with_accounts(vec![account])
    }

    pub fn with_accounts(accounts: Vec<AccountAddress>) -> Self {
        Self {
            accounts,
            available: true,
        }
    }

    /// Provider that authorizes nobody (user rejected, or wallet empty).
    pub fn empty() -> Self {
        Self::with_accounts(Vec::new())
    }

    /// No provider present at all.
    pub fn unavailable() -> Self {
        Self {
            accounts: Vec::new(),
            available: false,
        }
    }
}

#[async_trait]
impl WalletProvider for NullWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ChainError> {
        if !self.available {
            return Err(ChainError::ProviderUnavailable);
        }
        Ok(self.accounts.clone())
    }
}
