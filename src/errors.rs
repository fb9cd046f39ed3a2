use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

use crate::store::TradeStoreError;

/// Every failure the engine surfaces to callers. All variants are
/// recoverable-by-caller conditions; none are fatal to the process.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("insufficient funds: order costs {required}, cash balance is {available}")]
    InsufficientFunds {
        required: BigDecimal,
        available: BigDecimal,
    },
    #[error("insufficient shares: tried to sell {requested} {symbol}, holding {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },
    #[error("no quote available for {0}")]
    QuoteUnavailable(String),
    #[error("portfolio {0} not found")]
    PortfolioNotFound(Uuid),
    #[error("trade store error: {0}")]
    Store(#[from] TradeStoreError),
}
