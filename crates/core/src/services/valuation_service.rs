use crate::models::market::PriceMap;
use crate::models::portfolio::Portfolio;
use crate::models::valuation::{HoldingValuation, ValuationReport};

/// Values holdings against current prices and computes profit/loss.
///
/// Prices are looked up per holding by id, so the feed may omit or reorder
/// assets freely. A missing price counts as 0. Holdings with unknown cost are
/// measured against their current value, which makes their profit/loss 0.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Build a valuation report; rows follow the portfolio's stored order.
    #[must_use]
    pub fn valuate(&self, portfolio: &Portfolio, prices: &PriceMap) -> ValuationReport {
        let mut total_value = 0.0;
        let mut total_investment = 0.0;

        let holdings: Vec<HoldingValuation> = portfolio
            .iter()
            .map(|holding| {
                let current_price = prices.get(&holding.id).copied().unwrap_or(0.0);
                let current_value = holding.amount * current_price;
                let investment = holding.invested().unwrap_or(current_value);
                let profit_loss = current_value - investment;

                total_value += current_value;
                total_investment += investment;

                HoldingValuation {
                    id: holding.id.clone(),
                    name: holding.name.clone(),
                    amount: holding.amount,
                    cost_basis: holding.cost_basis,
                    current_price,
                    current_value,
                    investment,
                    profit_loss,
                    profit_loss_percent: percent_of(profit_loss, investment),
                }
            })
            .collect();

        let total_profit_loss = total_value - total_investment;

        ValuationReport {
            count: holdings.len(),
            holdings,
            total_value,
            total_investment,
            total_profit_loss,
            total_profit_loss_percent: percent_of(total_profit_loss, total_investment),
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// `part / whole × 100`, or 0 when `whole` is not positive.
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
