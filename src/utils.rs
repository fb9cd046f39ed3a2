use bigdecimal::{rounding::RoundingMode, BigDecimal};

/// Decimal places for cash, prices, and trade amounts.
pub const MONEY_SCALE: i64 = 2;
/// Decimal places for a position's weighted average cost.
pub const COST_SCALE: i64 = 6;
/// Decimal places for P&L percentages.
pub const PERCENT_SCALE: i64 = 4;

// Half-even is the one rounding rule used anywhere in the engine. All
// intermediate division goes through one of these helpers.

pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfEven)
}

pub fn round_cost(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(COST_SCALE, RoundingMode::HalfEven)
}

pub fn round_percent(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(PERCENT_SCALE, RoundingMode::HalfEven)
}
