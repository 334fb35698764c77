use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::market::{MarketCoin, PriceMap};
use crate::models::portfolio::Portfolio;
use crate::providers::traits::PriceFeed;

/// Fetches current prices for a portfolio and turns feed rows into a `PriceMap`.
///
/// No retries and no caching: every call hits the feed once.
pub struct PriceService;

impl PriceService {
    pub fn new() -> Self {
        Self
    }

    /// Ask the feed for every held id and key the answer by id.
    /// An empty portfolio makes no request.
    pub async fn fetch_prices(
        &self,
        feed: &dyn PriceFeed,
        portfolio: &Portfolio,
        vs_currency: &str,
    ) -> Result<PriceMap, CoreError> {
        if portfolio.is_empty() {
            return Ok(PriceMap::new());
        }
        let coins = feed.get_markets(&portfolio.ids(), vs_currency).await?;
        let prices = build_price_map(&coins);
        debug!(
            feed = feed.name(),
            requested = portfolio.len(),
            priced = prices.len(),
            "Prices fetched"
        );
        Ok(prices)
    }

    /// Like `fetch_prices`, but a feed failure is logged and yields an empty
    /// map so valuation can go on with every price at 0.
    pub async fn prices_or_empty(
        &self,
        feed: &dyn PriceFeed,
        portfolio: &Portfolio,
        vs_currency: &str,
    ) -> PriceMap {
        match self.fetch_prices(feed, portfolio, vs_currency).await {
            Ok(prices) => prices,
            Err(e) => {
                warn!(feed = feed.name(), error = %e, "Price feed failed, valuing without prices");
                PriceMap::new()
            }
        }
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}

/// Key market rows by id. Rows without a price, or with a non-finite or
/// negative one, are skipped. If an id repeats, the first row wins.
#[must_use]
pub fn build_price_map(coins: &[MarketCoin]) -> PriceMap {
    let mut prices = PriceMap::with_capacity(coins.len());
    for coin in coins {
        match coin.current_price {
            Some(price) if price.is_finite() && price >= 0.0 => {
                prices.entry(coin.id.clone()).or_insert(price);
            }
            _ => debug!(id = %coin.id, "Skipping market row without a usable price"),
        }
    }
    prices
}
