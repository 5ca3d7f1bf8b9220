//! Cycle lifecycle controller.
//!
//! Evaluated once per block with the host block time. The tick is total:
//! it never returns an error and never panics, because it sits on the
//! unconditional per-block path. A failed supply query skips the tick and
//! retries next block.

use crate::params::{scaled_truncate, HalvingParams};
use crate::state::HalvingCycleState;
use ember_ledger::Ledger;
use ember_types::UnixTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What a tick did to the cycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// No transition this block.
    Idle,
    /// First cycle opened from an uninitialized state.
    Started,
    /// Distribution window closed; pause began.
    Paused,
    /// A new cycle opened with a fresh supply snapshot.
    Advanced,
    /// Supply crossed the minimum threshold; engine terminated permanently.
    Halted,
    /// Supply query failed; nothing evaluated this block.
    SupplyUnavailable,
}

pub struct CycleController<'a> {
    params: &'a HalvingParams,
}

impl<'a> CycleController<'a> {
    pub fn new(params: &'a HalvingParams) -> Self {
        Self { params }
    }

    /// Advance the state machine by one block.
    ///
    /// Several transitions may fire in a single tick after a long block-time
    /// gap (pause then advance); the most significant event is returned.
    pub fn tick(
        &self,
        slot: &mut Option<HalvingCycleState>,
        ledger: &dyn Ledger,
        now: UnixTime,
    ) -> CycleEvent {
        if slot.as_ref().is_some_and(|s| s.halted) {
            debug!(target: "halving", "engine terminated, tick is a no-op");
            return CycleEvent::Idle;
        }

        let supply = match ledger.total_supply(&self.params.denom) {
            Ok(supply) => supply,
            Err(err) => {
                warn!(
                    target: "halving",
                    "supply query failed, skipping cycle evaluation this block: {err}"
                );
                return CycleEvent::SupplyUnavailable;
            }
        };

        let mut event = CycleEvent::Idle;

        if slot.is_none() {
            let fund = scaled_truncate(supply, self.params.reduction_rate);
            *slot = Some(HalvingCycleState::open(1, supply, fund, now));
            info!(
                target: "halving",
                "first halving cycle opened: supply={supply} fund={fund}"
            );
            event = CycleEvent::Started;
        }
        let state = match slot.as_mut() {
            Some(state) => state,
            None => return event,
        };

        if supply < self.params.minimum_supply_threshold {
            state.halted = true;
            state.distribution_active = false;
            info!(
                target: "halving",
                "supply {supply} under minimum threshold {}, halving terminated permanently",
                self.params.minimum_supply_threshold
            );
            return CycleEvent::Halted;
        }

        if state.distribution_active
            && now - state.distribution_start_time >= self.params.distribution_period_secs
        {
            state.distribution_active = false;
            state.pause_start_time = Some(now);
            info!(
                target: "halving",
                "cycle {} distribution window closed after distributing {}, entering pause",
                state.cycle_number, state.distributed_in_cycle
            );
            event = CycleEvent::Paused;
        }

        if !state.distribution_active
            && now - state.cycle_start_time >= self.params.cycle_duration_secs
        {
            let fund = scaled_truncate(supply, self.params.reduction_rate);
            let next = state.cycle_number + 1;
            *state = HalvingCycleState::open(next, supply, fund, now);
            info!(
                target: "halving",
                "advanced to halving cycle {next}: supply={supply} fund={fund}"
            );
            event = CycleEvent::Advanced;
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CyclePhase;
    use ember_ledger::InMemoryLedger;
    use ember_types::{MICRO_PER_EMBR, SECONDS_PER_DAY};

    fn setup() -> (HalvingParams, InMemoryLedger, Option<HalvingCycleState>) {
        let params = HalvingParams::default();
        let ledger = InMemoryLedger::new("uembr", 85_000_000 * MICRO_PER_EMBR);
        (params, ledger, None)
    }

    #[test]
    fn first_tick_opens_cycle_and_snapshots_supply() {
        let (params, ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        let event = controller.tick(&mut slot, &ledger, 1_000);
        assert_eq!(event, CycleEvent::Started);

        let state = slot.unwrap();
        assert_eq!(state.cycle_number, 1);
        assert_eq!(state.total_supply_snapshot, 85_000_000 * MICRO_PER_EMBR);
        assert_eq!(state.halving_fund, 12_750_000 * MICRO_PER_EMBR);
        assert_eq!(state.phase(), CyclePhase::Distributing);
    }

    #[test]
    fn distribution_window_closes_after_period() {
        let (params, ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        controller.tick(&mut slot, &ledger, 0);
        let event = controller.tick(&mut slot, &ledger, 730 * SECONDS_PER_DAY);
        assert_eq!(event, CycleEvent::Paused);

        let state = slot.as_ref().unwrap();
        assert_eq!(state.phase(), CyclePhase::Paused);
        assert_eq!(state.pause_start_time, Some(730 * SECONDS_PER_DAY));
    }

    #[test]
    fn cycle_advances_after_duration_with_fresh_snapshot() {
        let (params, mut ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        controller.tick(&mut slot, &ledger, 0);
        controller.tick(&mut slot, &ledger, 730 * SECONDS_PER_DAY);

        // external supply movement during the pause
        ledger.burn_from_module("uembr", 5_000_000 * MICRO_PER_EMBR).unwrap();

        let event = controller.tick(&mut slot, &ledger, 5 * 365 * SECONDS_PER_DAY);
        assert_eq!(event, CycleEvent::Advanced);

        let state = slot.as_ref().unwrap();
        assert_eq!(state.cycle_number, 2);
        assert_eq!(state.total_supply_snapshot, 80_000_000 * MICRO_PER_EMBR);
        assert_eq!(state.halving_fund, 12_000_000 * MICRO_PER_EMBR);
        assert_eq!(state.distributed_in_cycle, 0);
        assert!(state.last_monthly_distribution_time.is_none());
    }

    #[test]
    fn pause_and_advance_fire_in_one_tick_after_long_gap() {
        let (params, ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        controller.tick(&mut slot, &ledger, 0);
        let event = controller.tick(&mut slot, &ledger, 6 * 365 * SECONDS_PER_DAY);
        assert_eq!(event, CycleEvent::Advanced);
        assert_eq!(slot.as_ref().unwrap().cycle_number, 2);
    }

    #[test]
    fn cycle_does_not_advance_under_threshold() {
        let (params, mut ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        controller.tick(&mut slot, &ledger, 0);
        controller.tick(&mut slot, &ledger, 730 * SECONDS_PER_DAY);

        // drain almost the whole supply during the pause
        ledger
            .burn_from_module("uembr", 85_000_000 * MICRO_PER_EMBR - 1)
            .unwrap();

        let event = controller.tick(&mut slot, &ledger, 5 * 365 * SECONDS_PER_DAY);
        assert_eq!(event, CycleEvent::Halted);
        assert_eq!(slot.as_ref().unwrap().phase(), CyclePhase::Terminated);
    }

    #[test]
    fn termination_is_idempotent() {
        let params = HalvingParams::default();
        let ledger = InMemoryLedger::new("uembr", 1);
        let controller = CycleController::new(&params);
        let mut slot = None;

        let event = controller.tick(&mut slot, &ledger, 0);
        assert_eq!(event, CycleEvent::Halted);

        for i in 1..=3 {
            let event = controller.tick(&mut slot, &ledger, i * SECONDS_PER_DAY);
            assert_eq!(event, CycleEvent::Idle);
        }
        assert_eq!(slot.as_ref().unwrap().phase(), CyclePhase::Terminated);
    }

    #[test]
    fn supply_outage_skips_the_tick() {
        let (params, mut ledger, mut slot) = setup();
        let controller = CycleController::new(&params);

        ledger.set_supply_unavailable(true);
        let event = controller.tick(&mut slot, &ledger, 0);
        assert_eq!(event, CycleEvent::SupplyUnavailable);
        assert!(slot.is_none());

        ledger.set_supply_unavailable(false);
        let event = controller.tick(&mut slot, &ledger, 10);
        assert_eq!(event, CycleEvent::Started);
    }
}
