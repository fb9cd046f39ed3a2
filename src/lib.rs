//! Paper-trading order-execution engine: a virtual cash balance, positions
//! with weighted average cost, and a TTL-bounded quote cache in front of an
//! external market-data provider. The surrounding application supplies auth,
//! routing, and serialization; this crate owns the money math and the
//! concurrency rules around it.

pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use config::EngineConfig;
pub use errors::EngineError;
pub use models::{Portfolio, Position, Quote, RejectReason, Trade, TradeSide, TradeStatus};
pub use state::AppState;
