//! Deterministic scalar aliases and time bucketing.
//!
//! All durations are expressed in whole seconds and all calendar math is
//! epoch-bucketed (a "month" is a fixed 30-day window counted from the unix
//! epoch, not a calendar month). Reward accounting depends on this exact
//! bucketing, so no wall-clock calendar library is involved here.

/// Micro-EMBR unit (1 EMBR = 10^8 uembr).
pub type Uembr = u128;

/// Unix timestamp in whole seconds, as supplied by the host's block time.
pub type UnixTime = i64;

/// Identifier of a 30-day accounting window counted from the unix epoch.
pub type WindowId = u64;

/// Conversion factor between EMBR and uembr.
pub const MICRO_PER_EMBR: Uembr = 100_000_000;

/// One day in seconds.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// One 30-day accounting window in seconds.
pub const SECONDS_PER_MONTH: i64 = 30 * SECONDS_PER_DAY;

/// One 365-day year in seconds.
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Bucket a block time into its 30-day accounting window.
///
/// Windows are `floor(unix_seconds / 30 days)`; times before the epoch
/// clamp to window 0.
pub fn window_id(now: UnixTime) -> WindowId {
    now.div_euclid(SECONDS_PER_MONTH).max(0) as WindowId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_buckets_by_thirty_days() {
        assert_eq!(window_id(0), 0);
        assert_eq!(window_id(SECONDS_PER_MONTH - 1), 0);
        assert_eq!(window_id(SECONDS_PER_MONTH), 1);
        assert_eq!(window_id(3 * SECONDS_PER_MONTH + 5), 3);
    }

    #[test]
    fn window_id_clamps_pre_epoch_times() {
        assert_eq!(window_id(-1), 0);
        assert_eq!(window_id(i64::MIN), 0);
    }
}
