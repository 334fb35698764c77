use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded position in one asset: how much is held and what it cost on average.
///
/// The serialized field names (`buyPrice`, `added`) match the documents written
/// by the browser dashboard, so an existing `cryptoPortfolio` slot loads as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Stable asset identifier as used by the price feed (e.g., "bitcoin")
    pub id: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Quantity held, summed over every buy. Never negative.
    pub amount: f64,

    /// Average price paid per unit in the quote currency.
    /// `None` means the cost is unknown and the current price is used as a
    /// neutral baseline when valuing the holding.
    #[serde(rename = "buyPrice", default)]
    pub cost_basis: Option<f64>,

    /// When the asset was first acquired
    #[serde(rename = "added", default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl Holding {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        cost_basis: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            cost_basis,
            added_at: Utc::now(),
        }
    }

    /// Total paid for this holding, if the cost basis is known.
    #[must_use]
    pub fn invested(&self) -> Option<f64> {
        self.cost_basis.map(|cost| self.amount * cost)
    }
}
