//! Denominated amounts.

use crate::scalars::Uembr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a single denomination, e.g. `531250uembr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Uembr,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Uembr) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_amount_denom_form() {
        let coin = Coin::new("uembr", 531_250);
        assert_eq!(coin.to_string(), "531250uembr");
    }
}
