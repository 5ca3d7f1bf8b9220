//! Host-ledger interface.

use ember_types::{AccountAddress, Coin, Uembr, ValidatorInfo};
use thiserror::Error;

/// Errors surfaced by the host ledger.
///
/// The halving engine treats everything here as transient except where a
/// burn or mint is involved; the caller decides severity, not the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unknown denomination {0}")]
    UnknownDenom(String),

    #[error("cannot burn {requested}: circulating supply is {supply}")]
    InsufficientSupply { requested: Uembr, supply: Uembr },

    #[error("module balance {balance} cannot cover transfer of {requested}")]
    InsufficientModuleBalance { requested: Uembr, balance: Uembr },

    #[error("malformed account address {0}")]
    MalformedAddress(String),

    #[error("ledger backend unavailable: {0}")]
    Unavailable(String),
}

/// Atomic balance-mutation primitives provided by the host ledger.
///
/// The host guarantees that each call commits atomically and that no two
/// blocks are processed concurrently, so implementations need no locking.
pub trait Ledger {
    /// Circulating supply of `denom`.
    fn total_supply(&self, denom: &str) -> Result<Uembr, LedgerError>;

    /// Burn `amount` of `denom` out of circulating supply via the module
    /// account's burn authority.
    fn burn_from_module(&mut self, denom: &str, amount: Uembr) -> Result<(), LedgerError>;

    /// Mint `amount` of `denom` into the module account.
    fn mint_to_module(&mut self, denom: &str, amount: Uembr) -> Result<(), LedgerError>;

    /// Move `coin` from the module account to `to`.
    fn transfer_from_module(&mut self, to: &AccountAddress, coin: &Coin) -> Result<(), LedgerError>;

    /// Current validator set as reported by the staking module. Entries
    /// carry their bonding status; recently-demoted validators may appear
    /// with a non-bonded status.
    fn bonded_validators(&self) -> Result<Vec<ValidatorInfo>, LedgerError>;

    /// Shared reward-pool account credited with the delegator bucket.
    fn delegator_pool_address(&self) -> Result<AccountAddress, LedgerError>;
}
