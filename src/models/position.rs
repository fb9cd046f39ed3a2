use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

// Current holdings of one symbol within a portfolio. A position with
// quantity 0 never exists: it is removed from the portfolio instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    /// Weighted average acquisition price of the shares currently held.
    /// Recomputed on every buy, untouched by sells.
    pub average_cost: BigDecimal,
}

impl Position {
    pub fn new(symbol: String, quantity: i64, average_cost: BigDecimal) -> Self {
        Self {
            symbol,
            quantity,
            average_cost,
        }
    }
}
