use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::Position;
use crate::state::AppState;
use crate::utils::{round_money, round_percent};

/// One position marked to its current price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionValuation {
    pub symbol: String,
    pub quantity: i64,
    pub average_cost: BigDecimal,
    pub current_price: BigDecimal,
    pub price_is_stale: bool,
    pub market_value: BigDecimal,
    pub unrealized_pnl: BigDecimal,
    pub unrealized_pnl_percent: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub portfolio_id: Uuid,
    pub cash_balance: BigDecimal,
    pub positions: Vec<PositionValuation>,
    /// Cash plus the market value of every position.
    pub total_value: BigDecimal,
    pub unrealized_pnl: BigDecimal,
    pub unrealized_pnl_percent: BigDecimal,
}

/// Mark every position to its current quoted price and roll the numbers up.
/// Pure read path: it never mutates the ledger, and touches the quote cache
/// only through `get_quote` (which may refresh expired entries). Stale
/// prices are tolerated and annotated per position; a held symbol with no
/// price at all surfaces as `QuoteUnavailable`.
pub async fn summarize(
    state: &AppState,
    portfolio_id: Uuid,
) -> Result<PortfolioSummary, EngineError> {
    let ledger = state.ledgers.get(portfolio_id)?;
    let snapshot = ledger.snapshot();

    let mut held: Vec<&Position> = snapshot.positions.values().collect();
    held.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut positions = Vec::with_capacity(held.len());
    let mut total_market_value = BigDecimal::from(0);
    let mut total_cost_basis = BigDecimal::from(0);

    for position in held {
        let quote = state.quote_cache.get_quote(&position.symbol).await?;
        let valued = value_position(position, &quote.price, quote.is_stale);
        total_market_value += &valued.market_value;
        total_cost_basis +=
            round_money(&(&position.average_cost * BigDecimal::from(position.quantity)));
        positions.push(valued);
    }

    let unrealized_pnl = round_money(&(&total_market_value - &total_cost_basis));
    let total_value = round_money(&(&snapshot.cash_balance + &total_market_value));

    Ok(PortfolioSummary {
        portfolio_id,
        cash_balance: snapshot.cash_balance,
        positions,
        total_value,
        unrealized_pnl_percent: pnl_percent(&unrealized_pnl, &total_cost_basis),
        unrealized_pnl,
    })
}

/// The position-list query: current holdings without valuation.
pub fn list_positions(state: &AppState, portfolio_id: Uuid) -> Result<Vec<Position>, EngineError> {
    Ok(state.ledgers.get(portfolio_id)?.positions())
}

fn value_position(position: &Position, price: &BigDecimal, is_stale: bool) -> PositionValuation {
    let quantity = BigDecimal::from(position.quantity);
    let market_value = round_money(&(price * &quantity));
    let cost_basis = round_money(&(&position.average_cost * &quantity));
    let unrealized_pnl = round_money(&(&market_value - &cost_basis));

    PositionValuation {
        symbol: position.symbol.clone(),
        quantity: position.quantity,
        average_cost: position.average_cost.clone(),
        current_price: price.clone(),
        price_is_stale: is_stale,
        market_value,
        unrealized_pnl_percent: pnl_percent(&unrealized_pnl, &cost_basis),
        unrealized_pnl,
    }
}

// P&L percent is defined as 0 when the cost basis is 0.
fn pnl_percent(pnl: &BigDecimal, cost_basis: &BigDecimal) -> BigDecimal {
    if cost_basis == &BigDecimal::from(0) {
        return BigDecimal::from(0);
    }
    round_percent(&(pnl / cost_basis * BigDecimal::from(100)))
}
