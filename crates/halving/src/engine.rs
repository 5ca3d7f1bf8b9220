//! Per-block orchestration.
//!
//! `begin_block` is the single entrypoint the host calls on every block,
//! before any other block-level logic observes the resulting state. It
//! runs synchronously on the block-processing thread and holds no locks;
//! the host's one-block-at-a-time guarantee is the concurrency model.

use crate::allocator::{Allocator, DistributionOutcome};
use crate::cycle::{CycleController, CycleEvent};
use crate::errors::HalvingError;
use crate::genesis::GenesisState;
use crate::history::{DistributionHistory, Page, PageRequest};
use crate::params::HalvingParams;
use crate::query::{CycleStatus, ValidatorUptimeView};
use crate::scheduler::DistributionScheduler;
use crate::state::{DistributionRecord, HalvingCycleState};
use crate::uptime::ActivityTracker;
use ember_ledger::Ledger;
use ember_types::{Uembr, UnixTime, ValidatorKey};
use tracing::{debug, info, warn};

/// What one block's tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub event: CycleEvent,
    pub distribution: Option<DistributionOutcome>,
}

/// The halving subsystem: cycle state, activity records, and audit trail
/// behind one per-block entrypoint.
#[derive(Debug, Clone)]
pub struct HalvingEngine {
    params: HalvingParams,
    state: Option<HalvingCycleState>,
    tracker: ActivityTracker,
    history: DistributionHistory,
}

impl HalvingEngine {
    pub fn new(params: HalvingParams) -> Result<Self, HalvingError> {
        params.validate()?;
        Ok(Self {
            params,
            state: None,
            tracker: ActivityTracker::new(),
            history: DistributionHistory::new(),
        })
    }

    /// Restore the engine from genesis.
    pub fn from_genesis(genesis: GenesisState) -> Result<Self, HalvingError> {
        genesis.validate()?;
        Ok(Self {
            params: genesis.params,
            state: genesis.cycle_state,
            tracker: ActivityTracker::new(),
            history: DistributionHistory::from_records(genesis.distribution_records),
        })
    }

    pub fn export_genesis(&self) -> GenesisState {
        GenesisState {
            params: self.params.clone(),
            cycle_state: self.state.clone(),
            distribution_records: self.history.records().to_vec(),
        }
    }

    /// Advance the subsystem by one block.
    ///
    /// Only monetary-integrity failures (burn/mint) surface as `Err`; in
    /// that case no state was committed for the attempted distribution, so
    /// the next trigger re-runs it. Everything else is handled locally.
    pub fn begin_block(
        &mut self,
        ledger: &mut dyn Ledger,
        now: UnixTime,
    ) -> Result<BlockOutcome, HalvingError> {
        match ledger.bonded_validators() {
            Ok(feed) => self.tracker.observe(&feed, now),
            Err(err) => {
                warn!(
                    target: "halving",
                    "validator feed unavailable, skipping activity update this block: {err}"
                );
            }
        }

        let event = CycleController::new(&self.params).tick(&mut self.state, ledger, now);
        if event == CycleEvent::SupplyUnavailable {
            return Ok(BlockOutcome {
                event,
                distribution: None,
            });
        }

        let mut distribution = None;
        if let Some(state) = self.state.as_mut() {
            let scheduler = DistributionScheduler::new(&self.params);
            if scheduler.is_due(state, now) {
                let monthly = scheduler.monthly_amount(state);
                if monthly == 0 {
                    debug!(
                        target: "halving",
                        "monthly distribution due in cycle {} but the fund is exhausted",
                        state.cycle_number
                    );
                } else {
                    let outcome = Allocator::new(&self.params, &self.tracker)
                        .distribute(ledger, state, monthly, now)?;

                    state.distributed_in_cycle =
                        state.distributed_in_cycle.saturating_add(monthly);
                    state.last_monthly_distribution_time = Some(now);
                    let record = DistributionRecord {
                        timestamp: now,
                        amount: monthly,
                        cycle_number: state.cycle_number,
                        month_in_cycle: state.month_in_cycle(now),
                    };
                    info!(
                        target: "halving",
                        "monthly distribution of {monthly} completed: cycle={} month={} remaining={}",
                        record.cycle_number,
                        record.month_in_cycle,
                        state.remaining_fund()
                    );
                    self.history.append(record);
                    distribution = Some(outcome);
                }
            }
        }

        Ok(BlockOutcome {
            event,
            distribution,
        })
    }

    pub fn params(&self) -> &HalvingParams {
        &self.params
    }

    pub fn state(&self) -> Option<&HalvingCycleState> {
        self.state.as_ref()
    }

    /// Current cycle snapshot, `None` before the first tick.
    pub fn cycle_status(&self, now: UnixTime) -> Option<CycleStatus> {
        self.state.as_ref().map(|s| CycleStatus::new(s, now))
    }

    pub fn distribution_history(&self, req: &PageRequest) -> Page {
        self.history.page(req)
    }

    pub fn distributions_between(&self, from: UnixTime, to: UnixTime) -> Vec<DistributionRecord> {
        self.history.between(from, to)
    }

    pub fn total_distributed(&self) -> Uembr {
        self.history.total_distributed()
    }

    pub fn validator_uptime(&self, key: &ValidatorKey) -> Option<ValidatorUptimeView> {
        self.tracker.record(key).map(ValidatorUptimeView::from)
    }

    pub fn validator_uptimes(&self) -> Vec<ValidatorUptimeView> {
        self.tracker.records().map(ValidatorUptimeView::from).collect()
    }
}
