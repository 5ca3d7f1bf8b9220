//! Ember core types
//!
//! Scalar aliases, time bucketing, and validator identity types shared by
//! the ledger adapter and the halving subsystem.
//!
//! Monetary unit: uembr (micro-EMBR). 1 EMBR = 10^8 uembr.

pub mod coin;
pub mod scalars;
pub mod validator;

pub use coin::*;
pub use scalars::*;
pub use validator::*;
