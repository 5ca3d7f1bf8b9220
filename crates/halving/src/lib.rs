//! Ember Halving Engine
//!
//! Scheduled, irreversible supply reduction for a proof-of-stake chain:
//! five-year cycles earmark 15% of circulating supply, pay it out in
//! monthly tranches over two years (70% validators / 20% delegators /
//! 10% dex pools, gated by per-validator activity), then pause for three
//! years. Runs once per block on the consensus-critical path, so the tick
//! is total and only monetary-integrity failures propagate.

pub mod allocator;
pub mod cycle;
pub mod engine;
pub mod errors;
pub mod genesis;
pub mod history;
pub mod params;
pub mod query;
pub mod scheduler;
pub mod state;
pub mod uptime;

pub use allocator::{Allocator, DistributionOutcome};
pub use cycle::{CycleController, CycleEvent};
pub use engine::{BlockOutcome, HalvingEngine};
pub use errors::HalvingError;
pub use genesis::GenesisState;
pub use history::{DistributionHistory, Page, PageRequest, DEFAULT_PAGE_LIMIT};
pub use params::{scaled_truncate, HalvingParams};
pub use query::{CycleStatus, ValidatorUptimeView};
pub use scheduler::DistributionScheduler;
pub use state::{CyclePhase, DistributionRecord, HalvingCycleState};
pub use uptime::{ActivityTracker, ValidatorUptimeRecord, INACTIVE_DAY_LIMIT};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
