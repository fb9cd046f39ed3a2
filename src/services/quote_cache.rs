use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::external::quote_provider::QuoteProvider;
use crate::models::Quote;

#[derive(Debug, Clone)]
struct CachedQuote {
    price: bigdecimal::BigDecimal,
    fetched_at: DateTime<Utc>,
}

type Slot = Arc<Mutex<Option<CachedQuote>>>;

/// Time-bounded cache of the last-known price per symbol.
///
/// Each symbol owns an independent slot, so unrelated symbols never
/// serialize against each other. Within one symbol the slot mutex is held
/// across the external fetch, which is what gives single-flight semantics:
/// concurrent callers during a miss queue on the mutex, and every caller
/// behind the winning fetch finds a fresh entry instead of fetching again.
pub struct QuoteCache {
    slots: DashMap<String, Slot>,
    provider: Arc<dyn QuoteProvider>,
    ttl: chrono::Duration,
    fetch_timeout: Duration,
}

impl QuoteCache {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: &EngineConfig) -> Self {
        Self {
            slots: DashMap::new(),
            provider,
            ttl: chrono::Duration::from_std(config.quote_ttl)
                .unwrap_or_else(|_| chrono::Duration::seconds(60)),
            fetch_timeout: config.fetch_timeout,
        }
    }

    /// Current price for a symbol. Fresh cache entries are returned without
    /// an external call; on a miss or expiry the provider is asked once, and
    /// when it fails (or times out) the previous entry is returned marked
    /// stale rather than failing outright. `QuoteUnavailable` only when
    /// there is no usable entry at all.
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, EngineError> {
        let slot = self
            .slots
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone();

        let mut entry = slot.lock().await;
        let now = Utc::now();

        if let Some(cached) = entry.as_ref() {
            if now - cached.fetched_at < self.ttl {
                debug!(symbol, "quote cache hit");
                return Ok(self.annotate(symbol, cached, false));
            }
        }

        match tokio::time::timeout(self.fetch_timeout, self.provider.fetch_quote(symbol)).await {
            Ok(Ok(external)) => {
                let cached = CachedQuote {
                    price: external.price,
                    fetched_at: external.timestamp,
                };
                let quote = self.annotate(symbol, &cached, false);
                *entry = Some(cached);
                debug!(symbol, price = %quote.price, "quote refreshed");
                Ok(quote)
            }
            Ok(Err(e)) => {
                warn!(symbol, error = %e, "quote fetch failed");
                self.stale_or_unavailable(symbol, entry.as_ref())
            }
            Err(_) => {
                warn!(symbol, timeout = ?self.fetch_timeout, "quote fetch timed out");
                self.stale_or_unavailable(symbol, entry.as_ref())
            }
        }
    }

    fn stale_or_unavailable(
        &self,
        symbol: &str,
        cached: Option<&CachedQuote>,
    ) -> Result<Quote, EngineError> {
        match cached {
            Some(cached) => {
                warn!(symbol, fetched_at = %cached.fetched_at, "serving stale quote");
                Ok(self.annotate(symbol, cached, true))
            }
            None => Err(EngineError::QuoteUnavailable(symbol.to_string())),
        }
    }

    fn annotate(&self, symbol: &str, cached: &CachedQuote, is_stale: bool) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price: cached.price.clone(),
            fetched_at: cached.fetched_at,
            is_stale,
        }
    }
}
