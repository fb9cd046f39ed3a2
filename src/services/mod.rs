pub mod ledger;
pub mod quote_cache;
pub mod trading_engine;
pub mod valuation;
