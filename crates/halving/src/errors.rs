use ember_ledger::LedgerError;
use ember_types::Uembr;
use thiserror::Error;

/// Errors surfaced by the halving subsystem.
///
/// Only monetary-integrity failures escape the per-block entrypoint; every
/// other ledger problem is handled locally as skip-and-retry.
#[derive(Debug, Error)]
pub enum HalvingError {
    #[error("invalid halving parameters: {0}")]
    InvalidParams(String),

    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),

    #[error("failed to burn {amount}{denom} from the module account")]
    Burn {
        amount: Uembr,
        denom: String,
        #[source]
        source: LedgerError,
    },

    #[error("failed to mint {amount}{denom} after burning {burned}{denom}; burned amount restored")]
    Mint {
        amount: Uembr,
        burned: Uembr,
        denom: String,
        #[source]
        source: LedgerError,
    },

    #[error("monetary integrity violated: {burned}{denom} burned and the compensating mint failed")]
    MonetaryIntegrity {
        burned: Uembr,
        denom: String,
        #[source]
        source: LedgerError,
    },
}
