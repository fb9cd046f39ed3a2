use std::collections::HashMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::models::Position;

// One user's virtual trading account: cash plus current positions, keyed by
// symbol. Mutated only through its owning Ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: uuid::Uuid,
    pub cash_balance: BigDecimal,
    pub positions: HashMap<String, Position>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Portfolio {
    pub fn new(starting_cash: BigDecimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            cash_balance: starting_cash,
            positions: HashMap::new(),
            created_at: chrono::Utc::now(),
        }
    }
}
