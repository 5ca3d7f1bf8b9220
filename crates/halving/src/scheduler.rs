//! Monthly distribution scheduling.

use crate::params::HalvingParams;
use crate::state::HalvingCycleState;
use ember_types::{Uembr, UnixTime};

pub struct DistributionScheduler<'a> {
    params: &'a HalvingParams,
}

impl<'a> DistributionScheduler<'a> {
    pub fn new(params: &'a HalvingParams) -> Self {
        Self { params }
    }

    /// True iff the distribution window is open and either no distribution
    /// has happened this cycle or a full trigger interval has elapsed.
    ///
    /// `last_monthly_distribution_time` is committed only after a fully
    /// successful distribution, so irregular block clocks cannot produce
    /// two payouts inside one 30-day window and a failed payout re-arms on
    /// the next block.
    pub fn is_due(&self, state: &HalvingCycleState, now: UnixTime) -> bool {
        if !state.distribution_active || state.halted {
            return false;
        }
        match state.last_monthly_distribution_time {
            None => true,
            Some(last) => now - last >= self.params.monthly_trigger_secs,
        }
    }

    /// `halving_fund / distribution_months`, truncated — the truncation
    /// remainder deliberately stays in the fund — clamped to what the fund
    /// still holds.
    pub fn monthly_amount(&self, state: &HalvingCycleState) -> Uembr {
        let base = state.halving_fund / Uembr::from(self.params.distribution_months());
        base.min(state.remaining_fund())
    }
}
