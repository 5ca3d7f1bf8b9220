//! Genesis import/export.
//!
//! Carries everything monetary — params, the cycle state, and the
//! distribution audit trail — so that export followed by import replays
//! deterministically. Uptime records are observational and rebuild from
//! the bonding feed.

use crate::errors::HalvingError;
use crate::params::HalvingParams;
use crate::state::{DistributionRecord, HalvingCycleState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: HalvingParams,
    /// `None` until the first tick opens cycle 1.
    pub cycle_state: Option<HalvingCycleState>,
    pub distribution_records: Vec<DistributionRecord>,
}

impl GenesisState {
    pub fn new(params: HalvingParams) -> Self {
        Self {
            params,
            cycle_state: None,
            distribution_records: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), HalvingError> {
        self.params.validate()?;

        if let Some(state) = &self.cycle_state {
            if state.cycle_number == 0 {
                return Err(HalvingError::InvalidGenesis(
                    "cycle numbering starts at 1".into(),
                ));
            }
            if state.distributed_in_cycle > state.halving_fund {
                return Err(HalvingError::InvalidGenesis(format!(
                    "distributed amount {} exceeds halving fund {}",
                    state.distributed_in_cycle, state.halving_fund
                )));
            }
            if state.distribution_active && state.pause_start_time.is_some() {
                return Err(HalvingError::InvalidGenesis(
                    "distribution cannot be active while paused".into(),
                ));
            }
            if state.distribution_active && state.halted {
                return Err(HalvingError::InvalidGenesis(
                    "distribution cannot be active after termination".into(),
                ));
            }
        } else if !self.distribution_records.is_empty() {
            return Err(HalvingError::InvalidGenesis(
                "distribution records require a cycle state".into(),
            ));
        }

        Ok(())
    }
}

impl Default for GenesisState {
    fn default() -> Self {
        Self::new(HalvingParams::default())
    }
}
