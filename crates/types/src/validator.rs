//! Validator identity and bonding-status types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Consensus public-key hash identifying a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidatorKey(pub [u8; 32]);

impl ValidatorKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a 64-character hex key.
    pub fn from_hex(s: &str) -> Result<Self, KeyParseError> {
        let raw = hex::decode(s).map_err(|_| KeyParseError::InvalidHex(s.to_string()))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| KeyParseError::InvalidLength(s.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ValidatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[derive(Debug, Error)]
pub enum KeyParseError {
    #[error("validator key is not valid hex: {0}")]
    InvalidHex(String),
    #[error("validator key must be 64 hex characters, got {0}")]
    InvalidLength(usize),
}

/// Bech32-style account address on the host ledger. Opaque to this
/// subsystem; the ledger adapter decides whether it is well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(pub String);

impl AccountAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bonding status reported by the host staking module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondStatus {
    Bonded,
    Unbonding,
    Unbonded,
}

impl BondStatus {
    pub fn is_bonded(&self) -> bool {
        matches!(self, BondStatus::Bonded)
    }
}

/// One entry of the validator bonding feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub key: ValidatorKey,
    pub operator_address: AccountAddress,
    pub status: BondStatus,
}
