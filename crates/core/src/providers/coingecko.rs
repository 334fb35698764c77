use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, instrument};

use super::traits::PriceFeed;
use crate::errors::{redact_query, CoreError};
use crate::models::market::MarketCoin;
use crate::models::settings::DEFAULT_API_BASE_URL;

const PROVIDER: &str = "CoinGecko";

/// Largest page the `/coins/markets` endpoint accepts.
pub const MAX_PER_PAGE: u32 = 250;

/// Page size used when the caller does not say otherwise.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Header carrying a CoinGecko demo-plan key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// CoinGecko market data provider.
///
/// - **Free**: public endpoint works without a key; a demo key raises limits.
/// - **Endpoint**: `/coins/markets` for both id lookups and top-N listings.
///
/// CoinGecko ids are lowercase slugs like "bitcoin", "ethereum", "usd-coin".
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, None)
    }

    /// Point the provider at a different API root (self-hosted proxy, test server).
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Full URL of the markets endpoint.
    #[must_use]
    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<MarketCoin>, CoreError> {
        let mut request = self.client.get(self.markets_url()).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("API request failed with status {status}"),
            });
        }

        let coins: Vec<MarketCoin> = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse markets response: {}", redact_query(&e.to_string())),
        })?;

        debug!(count = coins.len(), "Markets fetched");
        Ok(coins)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Query string for `/coins/markets`, in the order the dashboard always sent it.
///
/// With ids, the page is sized to fit every id (capped at the API maximum;
/// use `id_batch_queries` to cover longer id lists).
#[must_use]
pub fn markets_query(ids: Option<&[String]>, vs_currency: &str, per_page: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![("vs_currency", vs_currency.to_string())];
    let per_page = match ids {
        Some(ids) => {
            query.push(("ids", ids.join(",")));
            per_page.max(u32::try_from(ids.len()).unwrap_or(u32::MAX))
        }
        None => per_page,
    };
    query.extend([
        ("order", "market_cap_desc".to_string()),
        ("per_page", per_page.clamp(1, MAX_PER_PAGE).to_string()),
        ("page", "1".to_string()),
        ("sparkline", "false".to_string()),
    ]);
    query
}

/// One `/coins/markets` query per `MAX_PER_PAGE` ids, so every id is requested.
#[must_use]
pub fn id_batch_queries(ids: &[String], vs_currency: &str) -> Vec<Vec<(&'static str, String)>> {
    ids.chunks(MAX_PER_PAGE as usize)
        .map(|batch| markets_query(Some(batch), vs_currency, DEFAULT_PER_PAGE))
        .collect()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceFeed for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    async fn get_markets(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<Vec<MarketCoin>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let queries = id_batch_queries(ids, vs_currency);
        if queries.len() > 1 {
            debug!(batches = queries.len(), "Splitting markets request");
        }

        let mut coins = Vec::with_capacity(ids.len());
        for query in &queries {
            coins.extend(self.fetch(query).await?);
        }
        Ok(coins)
    }

    #[instrument(skip(self))]
    async fn get_top_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
    ) -> Result<Vec<MarketCoin>, CoreError> {
        let query = markets_query(None, vs_currency, per_page);
        self.fetch(&query).await
    }
}
