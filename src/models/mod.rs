pub mod portfolio;
pub mod position;
pub mod quote;
pub mod trade;

pub use portfolio::Portfolio;
pub use position::Position;
pub use quote::Quote;
pub use trade::{RejectReason, Trade, TradeSide, TradeStatus};
