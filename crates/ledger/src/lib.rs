//! Ember Ledger Adapter
//!
//! The synchronous interface this subsystem consumes from the host ledger:
//! supply queries, module-account burn/mint/transfer, the validator bonding
//! feed, and the delegator reward-pool address. All calls run in-process
//! against already-committed state on the single block-processing thread.

pub mod adapter;
pub mod memory;

pub use adapter::{Ledger, LedgerError};
pub use memory::InMemoryLedger;
