use serde::{Deserialize, Serialize};

/// Valuation of a single holding against the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub cost_basis: Option<f64>,

    /// Price used for this row; 0 when the feed had no price for the id
    pub current_price: f64,

    /// amount × current_price
    pub current_value: f64,

    /// amount × cost_basis, or current_value when the cost is unknown
    pub investment: f64,

    /// current_value − investment
    pub profit_loss: f64,

    /// profit_loss / investment × 100, or 0 when nothing was invested
    pub profit_loss_percent: f64,
}

/// Snapshot of the whole portfolio's value and profit/loss.
///
/// `holdings` keeps the portfolio's stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub holdings: Vec<HoldingValuation>,
    pub total_value: f64,
    pub total_investment: f64,
    pub total_profit_loss: f64,
    pub total_profit_loss_percent: f64,
    pub count: usize,
}
