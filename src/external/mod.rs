pub mod alphavantage;
pub mod quote_provider;
pub mod simulated;
