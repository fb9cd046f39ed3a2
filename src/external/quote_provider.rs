use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A price observation as delivered by an external market-data source,
/// before the cache annotates it.
#[derive(Debug, Clone)]
pub struct ExternalQuote {
    pub price: BigDecimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unknown symbol: {0}")]
    NotFound(String),
}

/// The narrow seam to the market-data integration. One call, one symbol,
/// one price; the QuoteCache decides when to invoke it.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError>;
}
