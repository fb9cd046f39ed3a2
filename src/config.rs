use std::str::FromStr;
use std::time::Duration;

use bigdecimal::BigDecimal;

/// Tunables for the engine. Each knob falls back to a sensible default when
/// the environment variable is unset or unparsable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum age before a cached quote is considered stale.
    pub quote_ttl: Duration,
    /// Bound on a single external quote fetch; a timeout is treated as a
    /// fetch failure.
    pub fetch_timeout: Duration,
    /// Cash balance a newly opened portfolio starts with.
    pub starting_cash: BigDecimal,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quote_ttl: std::env::var("QUOTE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.quote_ttl),
            fetch_timeout: std::env::var("QUOTE_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            starting_cash: std::env::var("STARTING_CASH")
                .ok()
                .and_then(|v| BigDecimal::from_str(&v).ok())
                .unwrap_or(defaults.starting_cash),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quote_ttl: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(5),
            // $100,000 of virtual cash for every new account.
            starting_cash: BigDecimal::from_str("100000.00").expect("literal parses"),
        }
    }
}
