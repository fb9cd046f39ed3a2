use std::str::FromStr;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use dashmap::DashMap;

use crate::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};

/// Keyless provider for development and demos: each symbol gets a random
/// walk starting at $100, stepping up to ±1% per fetch. Prices are always
/// positive and carry two decimal places like a real quote feed.
pub struct SimulatedQuoteProvider {
    last_price: DashMap<String, f64>,
}

impl SimulatedQuoteProvider {
    pub fn new() -> Self {
        Self {
            last_price: DashMap::new(),
        }
    }
}

impl Default for SimulatedQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for SimulatedQuoteProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let mut entry = self.last_price.entry(symbol.to_string()).or_insert(100.0);
        let next = (*entry * (1.0 + (rand::random::<f64>() - 0.5) * 0.02)).max(0.01);
        *entry = next;

        let price = BigDecimal::from_str(&format!("{next:.2}"))
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        Ok(ExternalQuote {
            price,
            timestamp: chrono::Utc::now(),
        })
    }
}
