use std::sync::Arc;

use crate::config::EngineConfig;
use crate::external::quote_provider::QuoteProvider;
use crate::services::ledger::LedgerRegistry;
use crate::services::quote_cache::QuoteCache;
use crate::store::TradeStore;

/// Everything the engine's operations run against. Cheap to clone; handed
/// to the surrounding application as its shared state.
#[derive(Clone)]
pub struct AppState {
    pub ledgers: Arc<LedgerRegistry>,
    pub quote_cache: Arc<QuoteCache>,
    pub trade_store: Arc<dyn TradeStore>,
    pub config: EngineConfig,
}

impl AppState {
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn QuoteProvider>,
        trade_store: Arc<dyn TradeStore>,
    ) -> Self {
        Self {
            ledgers: Arc::new(LedgerRegistry::new()),
            quote_cache: Arc::new(QuoteCache::new(provider, &config)),
            trade_store,
            config,
        }
    }
}
