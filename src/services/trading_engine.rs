use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{RejectReason, Trade, TradeSide};
use crate::state::AppState;

/// Validate an order against a fresh quote and the portfolio's ledger, then
/// commit it and record the trade.
///
/// The quote is fetched before the portfolio lock is taken, so a slow
/// provider never holds up other orders on the same portfolio, and the same
/// quote is used for validation and booking: what you see is what you pay.
/// No retries happen here; any failure is terminal for this order and the
/// caller may resubmit.
pub async fn place_order(
    state: &AppState,
    portfolio_id: Uuid,
    symbol: &str,
    side: TradeSide,
    quantity: i64,
) -> Result<Trade, EngineError> {
    if quantity <= 0 {
        return Err(EngineError::InvalidQuantity(quantity));
    }

    let ledger = state.ledgers.get(portfolio_id)?;
    let quote = state.quote_cache.get_quote(symbol).await?;

    let outcome = match side {
        TradeSide::Buy => ledger.apply_buy(symbol, quantity, &quote.price).map(|_| ()),
        TradeSide::Sell => ledger.apply_sell(symbol, quantity, &quote.price).map(|_| ()),
    };

    match outcome {
        Ok(()) => {
            let trade = Trade::executed(
                portfolio_id,
                symbol.to_string(),
                side,
                quantity,
                quote.price.clone(),
            );
            state.trade_store.record(&trade).await?;
            info!(
                trade_id = %trade.id,
                %portfolio_id,
                symbol,
                ?side,
                quantity,
                price = %trade.price,
                "order executed"
            );
            Ok(trade)
        }
        Err(err) => {
            // Rejections are audited as immutable REJECTED trades; the typed
            // error still goes back to the caller.
            let reason = match &err {
                EngineError::InsufficientFunds { .. } => RejectReason::InsufficientFunds,
                EngineError::InsufficientShares { .. } => RejectReason::InsufficientShares,
                _ => return Err(err),
            };
            let trade = Trade::rejected(
                portfolio_id,
                symbol.to_string(),
                side,
                quantity,
                quote.price.clone(),
                reason,
            );
            state.trade_store.record(&trade).await?;
            warn!(
                trade_id = %trade.id,
                %portfolio_id,
                symbol,
                ?side,
                quantity,
                ?reason,
                "order rejected"
            );
            Err(err)
        }
    }
}

/// Trade history for one portfolio, oldest first.
pub async fn trades_for(state: &AppState, portfolio_id: Uuid) -> Result<Vec<Trade>, EngineError> {
    state.ledgers.get(portfolio_id)?;
    Ok(state.trade_store.list_for_portfolio(portfolio_id).await?)
}

/// Single-trade lookup, scoped to the portfolio it belongs to.
pub async fn find_trade(
    state: &AppState,
    portfolio_id: Uuid,
    trade_id: Uuid,
) -> Result<Option<Trade>, EngineError> {
    state.ledgers.get(portfolio_id)?;
    let trade = state.trade_store.fetch_one(trade_id).await?;
    Ok(trade.filter(|t| t.portfolio_id == portfolio_id))
}
