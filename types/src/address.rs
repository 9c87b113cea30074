//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TallyError;

/// An account address as handed out by the wallet provider: `0x` followed
/// by 40 hex characters.
///
/// Stored lowercased so equality and hashing do not depend on the casing
/// the provider happened to use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex characters in the address body.
    pub const BODY_LEN: usize = 40;

    /// Parse and validate a raw address string.
    pub fn parse(raw: &str) -> Result<Self, TallyError> {
        let body = raw
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| TallyError::InvalidAddress(raw.to_string()))?;

        if body.len() != Self::BODY_LEN {
            return Err(TallyError::InvalidAddress(raw.to_string()));
        }

        hex::decode(body).map_err(|_| TallyError::InvalidAddress(raw.to_string()))?;

        Ok(Self(raw.to_lowercase()))
    }

    /// Return the canonical (lowercased) address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_address() {
        let raw = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1";
        let addr = AccountAddress::parse(raw).unwrap();
        assert_eq!(addr.as_str(), raw.to_lowercase());
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(AccountAddress::parse("90F8bf6A479f320ead074411a4B0e7944Ea8c9C1").is_err());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(AccountAddress::parse("0xabc").is_err());
        assert!(AccountAddress::parse(&format!("0x{}", "a".repeat(41))).is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(AccountAddress::parse(&format!("0x{}", "g".repeat(40))).is_err());
    }

    #[test]
    fn equality_ignores_input_casing() {
        let a = AccountAddress::parse("0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1").unwrap();
        let b = AccountAddress::parse("0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1").unwrap();
        assert_eq!(a, b);
    }
}
