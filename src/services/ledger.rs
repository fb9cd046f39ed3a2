use std::sync::Arc;

use bigdecimal::BigDecimal;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::{Portfolio, Position};
use crate::utils::{round_cost, round_money};

/// Owns one portfolio's cash balance and position set. The write lock is the
/// per-portfolio execution lock: `apply_buy`/`apply_sell` validate and commit
/// under it, so two concurrent orders can never both pass validation against
/// the same stale balance. Reads take the read lock and observe either the
/// pre- or post-state of a commit, never a partial update.
pub struct Ledger {
    inner: RwLock<Portfolio>,
}

impl Ledger {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            inner: RwLock::new(portfolio),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.read().id
    }

    pub fn cash_balance(&self) -> BigDecimal {
        self.inner.read().cash_balance.clone()
    }

    pub fn position(&self, symbol: &str) -> Option<Position> {
        self.inner.read().positions.get(symbol).cloned()
    }

    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> =
            self.inner.read().positions.values().cloned().collect();
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        positions
    }

    /// Consistent copy of the whole portfolio (cash and positions from the
    /// same instant).
    pub fn snapshot(&self) -> Portfolio {
        self.inner.read().clone()
    }

    /// Debit cash and fold the purchase into the position's weighted average
    /// cost. Fails with `InsufficientFunds` without touching anything.
    pub fn apply_buy(
        &self,
        symbol: &str,
        quantity: i64,
        price: &BigDecimal,
    ) -> Result<Position, EngineError> {
        let mut portfolio = self.inner.write();

        let cost = round_money(&(price * BigDecimal::from(quantity)));
        if cost > portfolio.cash_balance {
            return Err(EngineError::InsufficientFunds {
                required: cost,
                available: portfolio.cash_balance.clone(),
            });
        }

        portfolio.cash_balance = round_money(&(&portfolio.cash_balance - &cost));

        let position = match portfolio.positions.get(symbol) {
            Some(held) => {
                let old_quantity = BigDecimal::from(held.quantity);
                let new_quantity = held.quantity + quantity;
                // Weighted mean over held shares plus the incoming lot.
                let total_cost =
                    &old_quantity * &held.average_cost + price * BigDecimal::from(quantity);
                let average_cost = round_cost(&(total_cost / BigDecimal::from(new_quantity)));
                Position::new(symbol.to_string(), new_quantity, average_cost)
            }
            None => Position::new(symbol.to_string(), quantity, round_cost(price)),
        };

        portfolio
            .positions
            .insert(symbol.to_string(), position.clone());

        info!(
            portfolio_id = %portfolio.id,
            symbol,
            quantity,
            %price,
            cash_balance = %portfolio.cash_balance,
            "buy committed"
        );
        Ok(position)
    }

    /// Credit cash for the proceeds and shrink the position; average cost is
    /// untouched by sells. A position sold down to zero is removed, never
    /// kept as a zero row. Returns the surviving position, or `None` when it
    /// was exhausted.
    pub fn apply_sell(
        &self,
        symbol: &str,
        quantity: i64,
        price: &BigDecimal,
    ) -> Result<Option<Position>, EngineError> {
        let mut portfolio = self.inner.write();

        let held = match portfolio.positions.get(symbol) {
            Some(p) if p.quantity >= quantity => p.clone(),
            other => {
                return Err(EngineError::InsufficientShares {
                    symbol: symbol.to_string(),
                    requested: quantity,
                    held: other.map_or(0, |p| p.quantity),
                });
            }
        };

        let proceeds = round_money(&(price * BigDecimal::from(quantity)));
        portfolio.cash_balance = round_money(&(&portfolio.cash_balance + &proceeds));

        let remaining = held.quantity - quantity;
        let position = if remaining == 0 {
            portfolio.positions.remove(symbol);
            None
        } else {
            let position = Position::new(symbol.to_string(), remaining, held.average_cost);
            portfolio
                .positions
                .insert(symbol.to_string(), position.clone());
            Some(position)
        };

        info!(
            portfolio_id = %portfolio.id,
            symbol,
            quantity,
            %price,
            cash_balance = %portfolio.cash_balance,
            "sell committed"
        );
        Ok(position)
    }
}

/// All live portfolios, keyed by id. Distinct portfolios are fully
/// independent: each carries its own lock, and the registry map never
/// serializes them against each other.
#[derive(Default)]
pub struct LedgerRegistry {
    ledgers: DashMap<Uuid, Arc<Ledger>>,
}

impl LedgerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account setup: a fresh portfolio with the fixed starting cash and no
    /// positions.
    pub fn open(&self, starting_cash: BigDecimal) -> Arc<Ledger> {
        let portfolio = Portfolio::new(starting_cash);
        let id = portfolio.id;
        let ledger = Arc::new(Ledger::new(portfolio));
        self.ledgers.insert(id, ledger.clone());
        info!(portfolio_id = %id, "portfolio opened");
        ledger
    }

    pub fn get(&self, portfolio_id: Uuid) -> Result<Arc<Ledger>, EngineError> {
        self.ledgers
            .get(&portfolio_id)
            .map(|entry| entry.value().clone())
            .ok_or(EngineError::PortfolioNotFound(portfolio_id))
    }
}
