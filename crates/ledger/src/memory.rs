//! In-memory ledger for node-local simulation and deterministic testing.
//!
//! Keeps honest supply/module-account bookkeeping, records every mutating
//! call, and offers failure-injection knobs so the engine's skip-and-retry
//! and fatal paths can both be driven from tests.

use crate::adapter::{Ledger, LedgerError};
use ember_types::{AccountAddress, Coin, Uembr, ValidatorInfo};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    denom: String,
    total_supply: Uembr,
    module_balance: Uembr,
    accounts: HashMap<AccountAddress, Uembr>,
    validators: Vec<ValidatorInfo>,
    delegator_pool: AccountAddress,

    // failure injection
    #[serde(skip)]
    fail_next_burn: bool,
    #[serde(skip)]
    fail_next_mint: bool,
    #[serde(skip)]
    supply_unavailable: bool,
    #[serde(skip)]
    rejected_addresses: HashSet<AccountAddress>,

    // call recording
    #[serde(skip)]
    burn_calls: Vec<Uembr>,
    #[serde(skip)]
    mint_calls: Vec<Uembr>,
    #[serde(skip)]
    transfer_calls: Vec<(AccountAddress, Coin)>,
}

impl InMemoryLedger {
    pub fn new(denom: impl Into<String>, initial_supply: Uembr) -> Self {
        Self {
            denom: denom.into(),
            total_supply: initial_supply,
            delegator_pool: AccountAddress::new("ember1delegatorpool"),
            ..Default::default()
        }
    }

    pub fn set_validators(&mut self, validators: Vec<ValidatorInfo>) {
        self.validators = validators;
    }

    pub fn set_delegator_pool(&mut self, addr: AccountAddress) {
        self.delegator_pool = addr;
    }

    pub fn balance_of(&self, addr: &AccountAddress) -> Uembr {
        self.accounts.get(addr).copied().unwrap_or(0)
    }

    pub fn module_balance(&self) -> Uembr {
        self.module_balance
    }

    /// Fail the next burn with a backend error.
    pub fn fail_next_burn(&mut self) {
        self.fail_next_burn = true;
    }

    /// Fail the next mint with a backend error.
    pub fn fail_next_mint(&mut self) {
        self.fail_next_mint = true;
    }

    /// Make supply queries fail until re-enabled.
    pub fn set_supply_unavailable(&mut self, unavailable: bool) {
        self.supply_unavailable = unavailable;
    }

    /// Treat `addr` as malformed: transfers to it are rejected.
    pub fn reject_address(&mut self, addr: AccountAddress) {
        self.rejected_addresses.insert(addr);
    }

    pub fn burn_calls(&self) -> &[Uembr] {
        &self.burn_calls
    }

    pub fn mint_calls(&self) -> &[Uembr] {
        &self.mint_calls
    }

    pub fn transfer_calls(&self) -> &[(AccountAddress, Coin)] {
        &self.transfer_calls
    }

    fn check_denom(&self, denom: &str) -> Result<(), LedgerError> {
        if denom == self.denom {
            Ok(())
        } else {
            Err(LedgerError::UnknownDenom(denom.to_string()))
        }
    }
}

impl Ledger for InMemoryLedger {
    fn total_supply(&self, denom: &str) -> Result<Uembr, LedgerError> {
        if self.supply_unavailable {
            return Err(LedgerError::Unavailable("supply query down".into()));
        }
        self.check_denom(denom)?;
        Ok(self.total_supply)
    }

    fn burn_from_module(&mut self, denom: &str, amount: Uembr) -> Result<(), LedgerError> {
        self.check_denom(denom)?;
        if self.fail_next_burn {
            self.fail_next_burn = false;
            return Err(LedgerError::Unavailable("injected burn failure".into()));
        }
        if amount > self.total_supply {
            return Err(LedgerError::InsufficientSupply {
                requested: amount,
                supply: self.total_supply,
            });
        }
        self.total_supply -= amount;
        self.burn_calls.push(amount);
        debug!(target: "ledger", amount, supply = self.total_supply, "burned from module");
        Ok(())
    }

    fn mint_to_module(&mut self, denom: &str, amount: Uembr) -> Result<(), LedgerError> {
        self.check_denom(denom)?;
        if self.fail_next_mint {
            self.fail_next_mint = false;
            return Err(LedgerError::Unavailable("injected mint failure".into()));
        }
        self.total_supply = self.total_supply.saturating_add(amount);
        self.module_balance = self.module_balance.saturating_add(amount);
        self.mint_calls.push(amount);
        debug!(target: "ledger", amount, supply = self.total_supply, "minted to module");
        Ok(())
    }

    fn transfer_from_module(&mut self, to: &AccountAddress, coin: &Coin) -> Result<(), LedgerError> {
        self.check_denom(&coin.denom)?;
        if self.rejected_addresses.contains(to) {
            return Err(LedgerError::MalformedAddress(to.to_string()));
        }
        if coin.amount > self.module_balance {
            return Err(LedgerError::InsufficientModuleBalance {
                requested: coin.amount,
                balance: self.module_balance,
            });
        }
        self.module_balance -= coin.amount;
        let balance = self.accounts.entry(to.clone()).or_insert(0);
        *balance = balance.saturating_add(coin.amount);
        self.transfer_calls.push((to.clone(), coin.clone()));
        Ok(())
    }

    fn bonded_validators(&self) -> Result<Vec<ValidatorInfo>, LedgerError> {
        Ok(self.validators.clone())
    }

    fn delegator_pool_address(&self) -> Result<AccountAddress, LedgerError> {
        Ok(self.delegator_pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_types::{BondStatus, ValidatorKey};

    fn test_ledger() -> InMemoryLedger {
        InMemoryLedger::new("uembr", 1_000_000)
    }

    #[test]
    fn burn_reduces_supply() {
        let mut ledger = test_ledger();
        ledger.burn_from_module("uembr", 250_000).unwrap();
        assert_eq!(ledger.total_supply("uembr").unwrap(), 750_000);
        assert_eq!(ledger.burn_calls(), &[250_000]);
    }

    #[test]
    fn burn_rejects_more_than_supply() {
        let mut ledger = test_ledger();
        let err = ledger.burn_from_module("uembr", 2_000_000).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientSupply {
                requested: 2_000_000,
                supply: 1_000_000
            }
        );
    }

    #[test]
    fn mint_credits_module_account() {
        let mut ledger = test_ledger();
        ledger.mint_to_module("uembr", 100_000).unwrap();
        assert_eq!(ledger.total_supply("uembr").unwrap(), 1_100_000);
        assert_eq!(ledger.module_balance(), 100_000);
    }

    #[test]
    fn transfer_moves_module_funds() {
        let mut ledger = test_ledger();
        ledger.mint_to_module("uembr", 100_000).unwrap();

        let addr = AccountAddress::new("ember1recipient");
        ledger
            .transfer_from_module(&addr, &Coin::new("uembr", 60_000))
            .unwrap();

        assert_eq!(ledger.balance_of(&addr), 60_000);
        assert_eq!(ledger.module_balance(), 40_000);
    }

    #[test]
    fn transfer_requires_module_balance() {
        let mut ledger = test_ledger();
        let addr = AccountAddress::new("ember1recipient");
        let err = ledger
            .transfer_from_module(&addr, &Coin::new("uembr", 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientModuleBalance { .. }));
    }

    #[test]
    fn unknown_denom_is_rejected_everywhere() {
        let mut ledger = test_ledger();
        assert!(ledger.total_supply("uatom").is_err());
        assert!(ledger.burn_from_module("uatom", 1).is_err());
        assert!(ledger.mint_to_module("uatom", 1).is_err());
    }

    #[test]
    fn injected_failures_fire_once() {
        let mut ledger = test_ledger();
        ledger.fail_next_mint();
        assert!(ledger.mint_to_module("uembr", 1).is_err());
        assert!(ledger.mint_to_module("uembr", 1).is_ok());

        ledger.fail_next_burn();
        assert!(ledger.burn_from_module("uembr", 1).is_err());
        assert!(ledger.burn_from_module("uembr", 1).is_ok());
    }

    #[test]
    fn rejected_address_surfaces_malformed_error() {
        let mut ledger = test_ledger();
        ledger.mint_to_module("uembr", 10).unwrap();
        let bad = AccountAddress::new("not-an-address");
        ledger.reject_address(bad.clone());
        let err = ledger
            .transfer_from_module(&bad, &Coin::new("uembr", 10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::MalformedAddress(_)));
    }

    #[test]
    fn serde_round_trip_preserves_balances() {
        let mut ledger = test_ledger();
        ledger.mint_to_module("uembr", 500).unwrap();
        let addr = AccountAddress::new("ember1recipient");
        ledger
            .transfer_from_module(&addr, &Coin::new("uembr", 200))
            .unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: InMemoryLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.total_supply("uembr").unwrap(), 1_000_500);
        assert_eq!(restored.balance_of(&addr), 200);
        assert_eq!(restored.module_balance(), 300);
    }

    #[test]
    fn bonding_feed_round_trips() {
        let mut ledger = test_ledger();
        ledger.set_validators(vec![ValidatorInfo {
            key: ValidatorKey::new([1u8; 32]),
            operator_address: AccountAddress::new("embervaloper1aaa"),
            status: BondStatus::Bonded,
        }]);
        let feed = ledger.bonded_validators().unwrap();
        assert_eq!(feed.len(), 1);
        assert!(feed[0].status.is_bonded());
    }
}
