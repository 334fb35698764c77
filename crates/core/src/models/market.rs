use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current price per asset id, in the quote currency the feed was asked for.
pub type PriceMap = HashMap<String, f64>;

/// One row of the `/coins/markets` response.
///
/// Only `id` and `current_price` feed into valuation; the rest is carried
/// for callers that list markets. CoinGecko returns `null` for most numeric
/// fields on thinly traded coins, hence the `Option`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}
