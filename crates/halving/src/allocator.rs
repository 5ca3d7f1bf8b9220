//! Monthly reward allocation.
//!
//! Splits a monthly tranche into validator/delegator/dex buckets, performs
//! the burn-and-remint as one failure-atomic net-zero step, and issues the
//! individual transfers. Burn/mint failures propagate; every other failure
//! is local to the transfer that hit it.

use crate::errors::HalvingError;
use crate::params::{scaled_truncate, HalvingParams};
use crate::state::HalvingCycleState;
use crate::uptime::ActivityTracker;
use ember_ledger::Ledger;
use ember_types::{Coin, Uembr, UnixTime, ValidatorInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Result of one completed monthly distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOutcome {
    pub monthly_amount: Uembr,
    pub validator_bucket: Uembr,
    pub delegator_bucket: Uembr,
    pub dex_bucket: Uembr,
    pub eligible_validators: u32,
    pub rewarded_validators: u32,
    pub per_validator_amount: Uembr,
    /// Validator-bucket uembr left in the module account: division
    /// remainder, failed transfers, or the whole bucket when nobody was
    /// eligible.
    pub validator_forfeited: Uembr,
    pub delegator_paid: bool,
    pub dex_window_open: bool,
}

pub struct Allocator<'a> {
    params: &'a HalvingParams,
    tracker: &'a ActivityTracker,
}

impl<'a> Allocator<'a> {
    pub fn new(params: &'a HalvingParams, tracker: &'a ActivityTracker) -> Self {
        Self { params, tracker }
    }

    /// Execute one monthly distribution of `monthly_amount`.
    pub fn distribute(
        &self,
        ledger: &mut dyn Ledger,
        state: &HalvingCycleState,
        monthly_amount: Uembr,
        now: UnixTime,
    ) -> Result<DistributionOutcome, HalvingError> {
        let validator_bucket = scaled_truncate(monthly_amount, self.params.validator_share);
        let delegator_bucket = scaled_truncate(monthly_amount, self.params.delegator_share);
        let dex_bucket = scaled_truncate(monthly_amount, self.params.dex_share);
        // Each bucket truncates, so the sum never exceeds what is burned;
        // split dust is net deflation.
        let bucket_sum = validator_bucket + delegator_bucket + dex_bucket;

        self.burn_then_mint(ledger, monthly_amount, bucket_sum)?;

        let (eligible, rewarded, per_validator, forfeited) =
            self.pay_validators(ledger, validator_bucket);
        let delegator_paid = self.pay_delegator_pool(ledger, delegator_bucket);
        let dex_window_open = self.route_dex(state, dex_bucket, now);

        Ok(DistributionOutcome {
            monthly_amount,
            validator_bucket,
            delegator_bucket,
            dex_bucket,
            eligible_validators: eligible,
            rewarded_validators: rewarded,
            per_validator_amount: per_validator,
            validator_forfeited: forfeited,
            delegator_paid,
            dex_window_open,
        })
    }

    /// Burn `burn` and mint `mint` as one net-zero monetary step.
    ///
    /// If the mint fails after the burn succeeded, a compensating mint of
    /// the burned amount restores supply before the error propagates; if
    /// the compensation itself fails, the distinct monetary-integrity
    /// error reports the stuck burn.
    fn burn_then_mint(
        &self,
        ledger: &mut dyn Ledger,
        burn: Uembr,
        mint: Uembr,
    ) -> Result<(), HalvingError> {
        let denom = &self.params.denom;

        ledger
            .burn_from_module(denom, burn)
            .map_err(|source| HalvingError::Burn {
                amount: burn,
                denom: denom.clone(),
                source,
            })?;

        if let Err(source) = ledger.mint_to_module(denom, mint) {
            return match ledger.mint_to_module(denom, burn) {
                Ok(()) => {
                    warn!(
                        target: "halving",
                        "mint of {mint}{denom} failed after burning {burn}{denom}; burn compensated, will retry next window"
                    );
                    Err(HalvingError::Mint {
                        amount: mint,
                        burned: burn,
                        denom: denom.clone(),
                        source,
                    })
                }
                Err(compensation) => Err(HalvingError::MonetaryIntegrity {
                    burned: burn,
                    denom: denom.clone(),
                    source: compensation,
                }),
            };
        }
        Ok(())
    }

    /// Even split of the validator bucket across eligible bonded
    /// validators. Returns (eligible, rewarded, per-validator, forfeited).
    fn pay_validators(
        &self,
        ledger: &mut dyn Ledger,
        bucket: Uembr,
    ) -> (u32, u32, Uembr, Uembr) {
        let feed = match ledger.bonded_validators() {
            Ok(feed) => feed,
            Err(err) => {
                warn!(
                    target: "halving",
                    "validator listing failed, validator bucket of {bucket} forfeited: {err}"
                );
                return (0, 0, 0, bucket);
            }
        };

        let bonded: Vec<ValidatorInfo> =
            feed.into_iter().filter(|v| v.status.is_bonded()).collect();
        if bonded.is_empty() {
            info!(
                target: "halving",
                "no bonded validators, validator bucket of {bucket} forfeited"
            );
            return (0, 0, 0, bucket);
        }

        let (eligible, ineligible): (Vec<ValidatorInfo>, Vec<ValidatorInfo>) = bonded
            .into_iter()
            .partition(|v| self.tracker.is_eligible(&v.key));
        for validator in &ineligible {
            info!(
                target: "halving",
                "validator {} forfeits this month's reward for inactivity",
                validator.key
            );
        }
        if eligible.is_empty() {
            info!(
                target: "halving",
                "no eligible validators, validator bucket of {bucket} forfeited"
            );
            return (0, 0, 0, bucket);
        }

        let per_validator = bucket / eligible.len() as Uembr;
        if per_validator == 0 {
            return (eligible.len() as u32, 0, 0, bucket);
        }

        let mut rewarded = 0u32;
        let mut paid_total: Uembr = 0;
        for validator in &eligible {
            let coin = Coin::new(self.params.denom.clone(), per_validator);
            match ledger.transfer_from_module(&validator.operator_address, &coin) {
                Ok(()) => {
                    rewarded += 1;
                    paid_total += per_validator;
                    debug!(
                        target: "halving",
                        "paid {coin} to validator {}",
                        validator.operator_address
                    );
                }
                Err(err) => {
                    error!(
                        target: "halving",
                        "reward transfer to validator {} failed, skipping: {err}",
                        validator.operator_address
                    );
                }
            }
        }

        (
            eligible.len() as u32,
            rewarded,
            per_validator,
            bucket - paid_total,
        )
    }

    /// Single transfer of the whole delegator bucket to the shared pool.
    /// Failure is local: the bucket stays in the module account.
    fn pay_delegator_pool(&self, ledger: &mut dyn Ledger, bucket: Uembr) -> bool {
        if bucket == 0 {
            return false;
        }
        let pool = match ledger.delegator_pool_address() {
            Ok(pool) => pool,
            Err(err) => {
                error!(
                    target: "halving",
                    "delegator pool lookup failed, bucket of {bucket} retained in module account: {err}"
                );
                return false;
            }
        };
        let coin = Coin::new(self.params.denom.clone(), bucket);
        match ledger.transfer_from_module(&pool, &coin) {
            Ok(()) => {
                info!(target: "halving", "paid {coin} to delegator pool {pool}");
                true
            }
            Err(err) => {
                error!(
                    target: "halving",
                    "delegator pool transfer failed, bucket of {bucket} retained in module account: {err}"
                );
                false
            }
        }
    }

    /// The dex bucket never leaves the module account; inside the window
    /// it is flagged for the off-chain router, afterwards it is plain
    /// forfeiture. Individual pools are unknown to this module.
    fn route_dex(&self, state: &HalvingCycleState, bucket: Uembr, now: UnixTime) -> bool {
        let open = now - state.distribution_start_time < self.params.dex_window_secs;
        if open {
            info!(
                target: "halving",
                "dex bucket of {bucket} held in module account for off-chain routing (cycle {})",
                state.cycle_number
            );
        } else {
            info!(
                target: "halving",
                "dex routing window closed, bucket of {bucket} retained in module account (cycle {})",
                state.cycle_number
            );
        }
        open
    }
}
