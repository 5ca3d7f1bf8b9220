//! Per-validator activity accounting.
//!
//! Counts inactive days inside 30-day epoch windows and decides reward
//! eligibility for the allocator. This module never jails or unbonds;
//! crossing the limit only forfeits the reward for the current window.

use ember_types::{window_id, UnixTime, ValidatorInfo, ValidatorKey, WindowId, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A validator inactive for more than this many days in a window forfeits
/// that window's reward.
pub const INACTIVE_DAY_LIMIT: u32 = 10;

/// Activity record for one validator in its current accounting window.
///
/// `inactive_days` resets exactly once per window, when the window id
/// rolls over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorUptimeRecord {
    pub validator: ValidatorKey,
    pub window_id: WindowId,
    pub inactive_days: u32,
    pub last_active_at: UnixTime,
    pub last_checked_at: UnixTime,
}

impl ValidatorUptimeRecord {
    fn fresh(validator: ValidatorKey, now: UnixTime) -> Self {
        Self {
            validator,
            window_id: window_id(now),
            inactive_days: 0,
            last_active_at: now,
            last_checked_at: now,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.inactive_days <= INACTIVE_DAY_LIMIT
    }
}

/// Tracks activity records for every validator seen in the bonding feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityTracker {
    records: HashMap<ValidatorKey, ValidatorUptimeRecord>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one block's bonding feed into the records.
    ///
    /// Records are created lazily on first observation. A non-bonded
    /// validator accrues at most one inactive day per 24 hours of block
    /// time.
    pub fn observe(&mut self, feed: &[ValidatorInfo], now: UnixTime) {
        let window = window_id(now);
        for info in feed {
            let record = self
                .records
                .entry(info.key)
                .or_insert_with(|| ValidatorUptimeRecord::fresh(info.key, now));

            if record.window_id != window {
                // New accounting window: strikes reset, eligible again.
                record.window_id = window;
                record.inactive_days = 0;
                record.last_checked_at = now;
            } else if !info.status.is_bonded()
                && now - record.last_checked_at >= SECONDS_PER_DAY
            {
                record.inactive_days += 1;
                record.last_checked_at = now;
                debug!(
                    target: "halving",
                    "validator {} inactive for {} day(s) in window {}",
                    info.key, record.inactive_days, window
                );
            }

            if info.status.is_bonded() {
                record.last_active_at = now;
            }
        }
    }

    /// Unknown validators are eligible until observed otherwise.
    pub fn is_eligible(&self, key: &ValidatorKey) -> bool {
        self.records.get(key).map_or(true, |r| r.is_eligible())
    }

    pub fn record(&self, key: &ValidatorKey) -> Option<&ValidatorUptimeRecord> {
        self.records.get(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &ValidatorUptimeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
