use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Trade;

#[derive(Debug, Error)]
pub enum TradeStoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable home for trade records. Implementations must treat trades as
/// append-only: once recorded, a trade is never mutated or deleted.
#[async_trait]
pub trait TradeStore: Send + Sync {
    async fn record(&self, trade: &Trade) -> Result<(), TradeStoreError>;

    /// All trades for one portfolio, oldest first.
    async fn list_for_portfolio(&self, portfolio_id: Uuid) -> Result<Vec<Trade>, TradeStoreError>;

    async fn fetch_one(&self, trade_id: Uuid) -> Result<Option<Trade>, TradeStoreError>;
}
