use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::Trade;
use crate::store::trade_store::{TradeStore, TradeStoreError};

/// Append-only in-memory trade log. The default store for the simulator;
/// a database-backed implementation slots in behind the same trait.
#[derive(Default)]
pub struct InMemoryTradeStore {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeStore for InMemoryTradeStore {
    async fn record(&self, trade: &Trade) -> Result<(), TradeStoreError> {
        self.trades.write().push(trade.clone());
        Ok(())
    }

    async fn list_for_portfolio(&self, portfolio_id: Uuid) -> Result<Vec<Trade>, TradeStoreError> {
        let trades = self.trades.read();
        Ok(trades
            .iter()
            .filter(|t| t.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn fetch_one(&self, trade_id: Uuid) -> Result<Option<Trade>, TradeStoreError> {
        let trades = self.trades.read();
        Ok(trades.iter().find(|t| t.id == trade_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeSide;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn records_and_filters_by_portfolio() {
        let store = InMemoryTradeStore::new();
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let price = BigDecimal::from_str("150.00").unwrap();

        let trade = Trade::executed(mine, "AAPL".into(), TradeSide::Buy, 10, price.clone());
        store.record(&trade).await.unwrap();
        store
            .record(&Trade::executed(theirs, "MSFT".into(), TradeSide::Buy, 1, price))
            .await
            .unwrap();

        let listed = store.list_for_portfolio(mine).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].symbol, "AAPL");

        assert!(store.fetch_one(trade.id).await.unwrap().is_some());
        assert!(store.fetch_one(Uuid::new_v4()).await.unwrap().is_none());
    }
}
