//! Genesis-fixed parameters of the halving engine.
//!
//! There is no live governance over these values; they are validated once
//! at genesis and treated as immutable afterwards. Rates and shares are
//! exact decimal fractions, and every conversion into uembr truncates.

use crate::errors::HalvingError;
use ember_types::{Uembr, MICRO_PER_EMBR, SECONDS_PER_DAY, SECONDS_PER_MONTH, SECONDS_PER_YEAR};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalvingParams {
    /// Main denomination moved by every burn/mint/transfer.
    pub denom: String,
    /// Full cycle length (distribution plus pause). Default 5 years.
    pub cycle_duration_secs: i64,
    /// Length of the distribution window at the start of each cycle.
    /// Default 730 days.
    pub distribution_period_secs: i64,
    /// Pause after the distribution window. Default 3 years.
    pub pause_period_secs: i64,
    /// Spacing between monthly distributions. Default 30 days.
    pub monthly_trigger_secs: i64,
    /// Window (from distribution start) during which the dex bucket is
    /// flagged for off-chain routing. Default 730 days.
    pub dex_window_secs: i64,
    /// Fraction of the supply snapshot earmarked per cycle. Default 0.15.
    pub reduction_rate: Decimal,
    /// Validator bucket share. Default 0.70.
    pub validator_share: Decimal,
    /// Delegator bucket share. Default 0.20.
    pub delegator_share: Decimal,
    /// DEX bucket share. Default 0.10.
    pub dex_share: Decimal,
    /// Supply floor below which the engine terminates permanently.
    /// Default 1,000 EMBR.
    pub minimum_supply_threshold: Uembr,
}

impl Default for HalvingParams {
    fn default() -> Self {
        Self {
            denom: "uembr".to_string(),
            cycle_duration_secs: 5 * SECONDS_PER_YEAR,
            distribution_period_secs: 730 * SECONDS_PER_DAY,
            pause_period_secs: 3 * SECONDS_PER_YEAR,
            monthly_trigger_secs: SECONDS_PER_MONTH,
            dex_window_secs: 730 * SECONDS_PER_DAY,
            reduction_rate: Decimal::new(15, 2),
            validator_share: Decimal::new(70, 2),
            delegator_share: Decimal::new(20, 2),
            dex_share: Decimal::new(10, 2),
            minimum_supply_threshold: 1_000 * MICRO_PER_EMBR,
        }
    }
}

impl HalvingParams {
    /// Number of monthly distributions that fit in the distribution window.
    pub fn distribution_months(&self) -> u32 {
        (self.distribution_period_secs / self.monthly_trigger_secs) as u32
    }

    pub fn validate(&self) -> Result<(), HalvingError> {
        if self.denom.is_empty() {
            return Err(HalvingError::InvalidParams("denom must not be empty".into()));
        }
        for (name, value) in [
            ("cycle_duration_secs", self.cycle_duration_secs),
            ("distribution_period_secs", self.distribution_period_secs),
            ("pause_period_secs", self.pause_period_secs),
            ("monthly_trigger_secs", self.monthly_trigger_secs),
            ("dex_window_secs", self.dex_window_secs),
        ] {
            if value <= 0 {
                return Err(HalvingError::InvalidParams(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.monthly_trigger_secs > self.distribution_period_secs {
            return Err(HalvingError::InvalidParams(
                "monthly trigger interval cannot exceed the distribution period".into(),
            ));
        }
        if self.distribution_period_secs + self.pause_period_secs != self.cycle_duration_secs {
            return Err(HalvingError::InvalidParams(format!(
                "distribution ({}) and pause ({}) periods must compose the full cycle ({})",
                self.distribution_period_secs, self.pause_period_secs, self.cycle_duration_secs
            )));
        }
        if self.reduction_rate <= Decimal::ZERO || self.reduction_rate >= Decimal::ONE {
            return Err(HalvingError::InvalidParams(format!(
                "reduction rate must be in (0, 1), got {}",
                self.reduction_rate
            )));
        }
        for (name, share) in [
            ("validator_share", self.validator_share),
            ("delegator_share", self.delegator_share),
            ("dex_share", self.dex_share),
        ] {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(HalvingError::InvalidParams(format!(
                    "{name} must be in [0, 1], got {share}"
                )));
            }
        }
        let total = self.validator_share + self.delegator_share + self.dex_share;
        if total != Decimal::ONE {
            return Err(HalvingError::InvalidParams(format!(
                "validator, delegator, and dex shares must sum to exactly 1, got {total}"
            )));
        }
        if self.minimum_supply_threshold == 0 {
            return Err(HalvingError::InvalidParams(
                "minimum supply threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Multiply `amount` by a decimal rate in [0, 1], truncating toward zero.
///
/// Uses integer math on the rate's mantissa so supply-scale amounts cannot
/// overflow the decimal mantissa range.
pub fn scaled_truncate(amount: Uembr, rate: Decimal) -> Uembr {
    let rate = rate.normalize();
    let scale = 10u128.pow(rate.scale());
    let numer = rate.mantissa().unsigned_abs();
    (amount / scale) * numer + (amount % scale) * numer / scale
}
