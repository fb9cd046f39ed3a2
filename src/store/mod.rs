pub mod memory;
pub mod trade_store;

pub use memory::InMemoryTradeStore;
pub use trade_store::{TradeStore, TradeStoreError};
