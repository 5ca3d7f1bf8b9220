//! Cycle state and the append-only distribution record.

use chrono::{DateTime, Utc};
use ember_types::{Uembr, UnixTime, SECONDS_PER_MONTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase derived from the cycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Monthly distributions are running.
    Distributing,
    /// Distribution window closed; waiting out the rest of the cycle.
    Paused,
    /// Supply fell under the minimum threshold; permanent.
    Terminated,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CyclePhase::Distributing => "distributing",
            CyclePhase::Paused => "paused",
            CyclePhase::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// State of the active halving cycle.
///
/// Invariants: `distributed_in_cycle <= halving_fund`; `cycle_number` only
/// increases; `distribution_active` and a set `pause_start_time` are
/// mutually exclusive. Mutated only by the cycle controller and the
/// per-block engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalvingCycleState {
    /// 1-based cycle counter.
    pub cycle_number: u64,
    pub cycle_start_time: UnixTime,
    /// Circulating supply observed when the cycle opened.
    pub total_supply_snapshot: Uembr,
    /// `total_supply_snapshot × reduction_rate`, truncated.
    pub halving_fund: Uembr,
    pub distribution_active: bool,
    pub distribution_start_time: UnixTime,
    pub distributed_in_cycle: Uembr,
    pub pause_start_time: Option<UnixTime>,
    pub last_monthly_distribution_time: Option<UnixTime>,
    /// Terminal marker; set once when supply crosses the minimum threshold.
    pub halted: bool,
}

impl HalvingCycleState {
    /// Open a cycle with a fresh supply snapshot; distribution starts
    /// immediately.
    pub fn open(cycle_number: u64, supply: Uembr, fund: Uembr, now: UnixTime) -> Self {
        Self {
            cycle_number,
            cycle_start_time: now,
            total_supply_snapshot: supply,
            halving_fund: fund,
            distribution_active: true,
            distribution_start_time: now,
            distributed_in_cycle: 0,
            pause_start_time: None,
            last_monthly_distribution_time: None,
            halted: false,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        if self.halted {
            CyclePhase::Terminated
        } else if self.distribution_active {
            CyclePhase::Distributing
        } else {
            CyclePhase::Paused
        }
    }

    /// Portion of the halving fund not yet distributed.
    pub fn remaining_fund(&self) -> Uembr {
        self.halving_fund.saturating_sub(self.distributed_in_cycle)
    }

    /// 1-based month index within the distribution window.
    pub fn month_in_cycle(&self, now: UnixTime) -> u32 {
        ((now - self.distribution_start_time).max(0) / SECONDS_PER_MONTH + 1) as u32
    }
}

/// One completed monthly distribution. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub timestamp: UnixTime,
    pub amount: Uembr,
    pub cycle_number: u64,
    pub month_in_cycle: u32,
}

impl DistributionRecord {
    /// Timestamp as UTC wall-clock time, for reporting.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_state_starts_distributing() {
        let state = HalvingCycleState::open(1, 1_000, 150, 42);
        assert_eq!(state.phase(), CyclePhase::Distributing);
        assert_eq!(state.remaining_fund(), 150);
        assert_eq!(state.cycle_start_time, 42);
        assert_eq!(state.distribution_start_time, 42);
        assert!(state.last_monthly_distribution_time.is_none());
    }

    #[test]
    fn phase_precedence_terminated_over_paused() {
        let mut state = HalvingCycleState::open(1, 1_000, 150, 0);
        state.distribution_active = false;
        assert_eq!(state.phase(), CyclePhase::Paused);
        state.halted = true;
        assert_eq!(state.phase(), CyclePhase::Terminated);
    }

    #[test]
    fn month_in_cycle_counts_thirty_day_windows() {
        let state = HalvingCycleState::open(1, 1_000, 150, 0);
        assert_eq!(state.month_in_cycle(0), 1);
        assert_eq!(state.month_in_cycle(SECONDS_PER_MONTH - 1), 1);
        assert_eq!(state.month_in_cycle(SECONDS_PER_MONTH), 2);
        assert_eq!(state.month_in_cycle(23 * SECONDS_PER_MONTH), 24);
    }

    #[test]
    fn record_renders_utc_timestamp() {
        let record = DistributionRecord {
            timestamp: 0,
            amount: 1,
            cycle_number: 1,
            month_in_cycle: 1,
        };
        assert_eq!(
            record.timestamp_utc().unwrap().to_rfc3339(),
            "1970-01-01T00:00:00+00:00"
        );
    }
}
