use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Executed,
    Rejected,
}

/// Why a rejected order was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    InsufficientFunds,
    InsufficientShares,
}

// Immutable record of an attempted order and its outcome. Created exactly
// once per order that reaches the ledger; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: i64,
    /// The quote price this order was validated and booked against.
    pub price: BigDecimal,
    pub total_amount: BigDecimal,
    pub status: TradeStatus,
    pub reject_reason: Option<RejectReason>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Trade {
    pub fn executed(
        portfolio_id: Uuid,
        symbol: String,
        side: TradeSide,
        quantity: i64,
        price: BigDecimal,
    ) -> Self {
        Self::record(portfolio_id, symbol, side, quantity, price, TradeStatus::Executed, None)
    }

    pub fn rejected(
        portfolio_id: Uuid,
        symbol: String,
        side: TradeSide,
        quantity: i64,
        price: BigDecimal,
        reason: RejectReason,
    ) -> Self {
        Self::record(
            portfolio_id,
            symbol,
            side,
            quantity,
            price,
            TradeStatus::Rejected,
            Some(reason),
        )
    }

    fn record(
        portfolio_id: Uuid,
        symbol: String,
        side: TradeSide,
        quantity: i64,
        price: BigDecimal,
        status: TradeStatus,
        reject_reason: Option<RejectReason>,
    ) -> Self {
        let total_amount = round_money(&(&price * BigDecimal::from(quantity)));
        Self {
            id: Uuid::new_v4(),
            portfolio_id,
            symbol,
            side,
            quantity,
            price,
            total_amount,
            status,
            reject_reason,
            created_at: chrono::Utc::now(),
        }
    }
}
