//! Read-only views for queries and the off-chain daemon.

use crate::state::{CyclePhase, HalvingCycleState};
use crate::uptime::ValidatorUptimeRecord;
use ember_types::{Uembr, UnixTime};
use serde::{Deserialize, Serialize};

/// Snapshot of the current cycle, as exposed to queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatus {
    pub cycle_number: u64,
    pub phase: CyclePhase,
    pub total_supply_snapshot: Uembr,
    pub halving_fund: Uembr,
    pub distributed_in_cycle: Uembr,
    pub remaining_fund: Uembr,
    pub cycle_start_time: UnixTime,
    pub distribution_start_time: UnixTime,
    pub pause_start_time: Option<UnixTime>,
    pub last_monthly_distribution_time: Option<UnixTime>,
    pub month_in_cycle: u32,
}

impl CycleStatus {
    pub fn new(state: &HalvingCycleState, now: UnixTime) -> Self {
        Self {
            cycle_number: state.cycle_number,
            phase: state.phase(),
            total_supply_snapshot: state.total_supply_snapshot,
            halving_fund: state.halving_fund,
            distributed_in_cycle: state.distributed_in_cycle,
            remaining_fund: state.remaining_fund(),
            cycle_start_time: state.cycle_start_time,
            distribution_start_time: state.distribution_start_time,
            pause_start_time: state.pause_start_time,
            last_monthly_distribution_time: state.last_monthly_distribution_time,
            month_in_cycle: state.month_in_cycle(now),
        }
    }
}

/// Per-validator uptime record plus the eligibility verdict derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorUptimeView {
    #[serde(flatten)]
    pub record: ValidatorUptimeRecord,
    pub eligible: bool,
}

impl From<&ValidatorUptimeRecord> for ValidatorUptimeView {
    fn from(record: &ValidatorUptimeRecord) -> Self {
        Self {
            record: record.clone(),
            eligible: record.is_eligible(),
        }
    }
}
