use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::market::MarketCoin;

/// Trait abstraction for market data sources.
///
/// The store never talks to a feed directly: callers fetch markets through
/// this trait, turn them into a `PriceMap`, and hand that to valuation.
/// Swapping CoinGecko for another source only touches the implementation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceFeed: Send + Sync {
    /// Human-readable name of this feed (for logs/errors).
    fn name(&self) -> &str;

    /// Market rows for the given asset ids, priced in `vs_currency`.
    /// The response may omit ids or return them in any order.
    async fn get_markets(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<Vec<MarketCoin>, CoreError>;

    /// The top `per_page` coins by market cap, priced in `vs_currency`.
    async fn get_top_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
    ) -> Result<Vec<MarketCoin>, CoreError>;
}
