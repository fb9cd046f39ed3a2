//! Portfolio summaries: market value, unrealized P&L, staleness annotation,
//! and the serde surface the surrounding API layer depends on.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use dashmap::DashMap;

use papertrade::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};
use papertrade::services::{trading_engine, valuation};
use papertrade::store::InMemoryTradeStore;
use papertrade::{AppState, EngineConfig, TradeSide};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

struct TestProvider {
    prices: DashMap<String, BigDecimal>,
    failing: AtomicBool,
}

impl TestProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            prices: DashMap::new(),
            failing: AtomicBool::new(false),
        })
    }

    fn set_price(&self, symbol: &str, price: &str) {
        self.prices.insert(symbol.to_string(), dec(price));
    }
}

#[async_trait]
impl QuoteProvider for TestProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(QuoteProviderError::Network("provider down".into()));
        }
        self.prices
            .get(symbol)
            .map(|price| ExternalQuote {
                price: price.clone(),
                timestamp: chrono::Utc::now(),
            })
            .ok_or_else(|| QuoteProviderError::NotFound(symbol.to_string()))
    }
}

fn state_with(provider: Arc<TestProvider>) -> AppState {
    let config = EngineConfig {
        quote_ttl: Duration::ZERO,
        ..EngineConfig::default()
    };
    AppState::new(config, provider, Arc::new(InMemoryTradeStore::new()))
}

#[tokio::test]
async fn summary_matches_the_worked_valuation_example() {
    let provider = TestProvider::new();
    let state = state_with(provider.clone());
    let portfolio_id = state.ledgers.open(dec("100000.00")).id();

    provider.set_price("AAPL", "150.00");
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Buy, 10)
        .await
        .unwrap();
    provider.set_price("AAPL", "170.00");
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Buy, 10)
        .await
        .unwrap();
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Sell, 5)
        .await
        .unwrap();

    // 15 shares, avg cost 160, marked at 175.
    provider.set_price("AAPL", "175.00");
    let summary = valuation::summarize(&state, portfolio_id).await.unwrap();

    assert_eq!(summary.positions.len(), 1);
    let aapl = &summary.positions[0];
    assert_eq!(aapl.quantity, 15);
    assert_eq!(aapl.market_value, dec("2625.00"));
    assert_eq!(aapl.unrealized_pnl, dec("225.00"));
    assert_eq!(aapl.unrealized_pnl_percent, dec("9.3750"));
    assert!(!aapl.price_is_stale);

    // Cash after 10@150 + 10@170 bought, 5@170 sold.
    assert_eq!(summary.cash_balance, dec("97550.00"));
    assert_eq!(summary.total_value, dec("100175.00"));
    assert_eq!(summary.unrealized_pnl, dec("225.00"));
    assert_eq!(summary.unrealized_pnl_percent, dec("9.3750"));
}

#[tokio::test]
async fn empty_portfolio_summarizes_to_cash_only() {
    let provider = TestProvider::new();
    let state = state_with(provider);
    let portfolio_id = state.ledgers.open(dec("100000.00")).id();

    let summary = valuation::summarize(&state, portfolio_id).await.unwrap();
    assert!(summary.positions.is_empty());
    assert_eq!(summary.total_value, dec("100000.00"));
    assert_eq!(summary.unrealized_pnl, dec("0.00"));
    assert_eq!(summary.unrealized_pnl_percent, BigDecimal::from(0));
}

#[tokio::test]
async fn stale_prices_are_tolerated_and_annotated() {
    let provider = TestProvider::new();
    let state = state_with(provider.clone());
    let portfolio_id = state.ledgers.open(dec("100000.00")).id();

    provider.set_price("AAPL", "150.00");
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Buy, 10)
        .await
        .unwrap();

    // Provider goes dark; with a zero TTL every lookup is an expired miss,
    // so the summary has to fall back to the cached price.
    provider.failing.store(true, Ordering::SeqCst);
    let summary = valuation::summarize(&state, portfolio_id).await.unwrap();

    let aapl = &summary.positions[0];
    assert!(aapl.price_is_stale);
    assert_eq!(aapl.current_price, dec("150.00"));
    assert_eq!(aapl.market_value, dec("1500.00"));
}

#[tokio::test]
async fn position_list_reflects_current_holdings() {
    let provider = TestProvider::new();
    let state = state_with(provider.clone());
    let portfolio_id = state.ledgers.open(dec("100000.00")).id();

    provider.set_price("AAPL", "150.00");
    provider.set_price("MSFT", "400.00");
    trading_engine::place_order(&state, portfolio_id, "MSFT", TradeSide::Buy, 2)
        .await
        .unwrap();
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Buy, 10)
        .await
        .unwrap();

    let positions = valuation::list_positions(&state, portfolio_id).unwrap();
    assert_eq!(positions.len(), 2);
    // Sorted by symbol for a stable API surface.
    assert_eq!(positions[0].symbol, "AAPL");
    assert_eq!(positions[1].symbol, "MSFT");
}

#[tokio::test]
async fn summary_serializes_for_the_api_layer() {
    let provider = TestProvider::new();
    let state = state_with(provider.clone());
    let portfolio_id = state.ledgers.open(dec("100000.00")).id();

    provider.set_price("AAPL", "150.00");
    trading_engine::place_order(&state, portfolio_id, "AAPL", TradeSide::Buy, 10)
        .await
        .unwrap();

    let summary = valuation::summarize(&state, portfolio_id).await.unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["positions"][0]["symbol"], "AAPL");
    assert_eq!(json["positions"][0]["quantity"], 10);
    assert!(json["total_value"].is_string() || json["total_value"].is_number());
}
