use tracing::debug;

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;

/// Merges buys into holdings and removes holdings.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Record a buy of `amount` units of `id`.
    ///
    /// - Unknown id: a new holding is appended with `cost_basis = unit_price`.
    /// - Known id: amounts are summed in place. With a price, the cost basis
    ///   becomes the quantity-weighted average (an unknown previous cost counts
    ///   as 0). Without a price, the existing cost basis is left alone.
    ///
    /// Input is validated first; on error the portfolio is untouched.
    pub fn upsert(
        &self,
        portfolio: &mut Portfolio,
        id: &str,
        name: &str,
        amount: f64,
        unit_price: Option<f64>,
    ) -> Result<(), CoreError> {
        let id = id.trim();
        Self::validate_buy(id, amount, unit_price)?;

        let Some(idx) = portfolio.holdings.iter().position(|h| h.id == id) else {
            let name = match name.trim() {
                "" => id,
                trimmed => trimmed,
            };
            portfolio
                .holdings
                .push(Holding::new(id, name, amount, unit_price));
            debug!(id, amount, "New holding added");
            return Ok(());
        };

        let existing = &mut portfolio.holdings[idx];
        let prev_amount = existing.amount;
        let new_amount = prev_amount + amount;
        if !new_amount.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Adding {amount} to {prev_amount} {id} overflows the holding amount"
            )));
        }

        if let Some(price) = unit_price {
            let prev_cost = existing.cost_basis.unwrap_or(0.0);
            let new_cost = (prev_amount * prev_cost + amount * price) / new_amount;
            if !new_cost.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Cost basis for {id} cannot be represented after this buy"
                )));
            }
            existing.cost_basis = Some(new_cost);
        }
        existing.amount = new_amount;

        debug!(id, amount = new_amount, cost_basis = ?existing.cost_basis, "Holding merged");
        Ok(())
    }

    /// Drop the holding with `id`. Returns whether anything was removed;
    /// an absent id is not an error.
    pub fn remove(&self, portfolio: &mut Portfolio, id: &str) -> bool {
        let id = id.trim();
        let before = portfolio.holdings.len();
        portfolio.holdings.retain(|h| h.id != id);
        portfolio.holdings.len() != before
    }

    /// Validate a buy before it touches the portfolio.
    ///
    /// Rules:
    /// - Asset id must not be blank
    /// - Amount must be a positive finite number
    /// - Unit price, when given, must be a positive finite number
    pub fn validate_buy(id: &str, amount: f64, unit_price: Option<f64>) -> Result<(), CoreError> {
        if id.trim().is_empty() {
            return Err(CoreError::ValidationError("Asset id must not be empty".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number (got {amount})"
            )));
        }
        if let Some(price) = unit_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Buy price must be a positive number (got {price})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
