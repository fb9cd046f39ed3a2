use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A price observation for one symbol. `is_stale` is set when the entry has
/// outlived the cache TTL but was returned anyway because the external
/// provider could not supply a fresher one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: BigDecimal,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
    pub is_stale: bool,
}
