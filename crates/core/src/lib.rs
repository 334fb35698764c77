pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{market::PriceMap, portfolio::Portfolio, valuation::ValuationReport};
use providers::traits::PriceFeed;
use services::{
    portfolio_service::PortfolioService, price_service::PriceService,
    valuation_service::ValuationService,
};
use storage::{manager::StorageManager, traits::Persistence};
use tracing::{info, warn};

use errors::CoreError;

/// Main entry point for the crypto dashboard core library.
///
/// Owns the persisted holdings through an injected `Persistence` slot.
/// Every mutation reads the document, applies the change and writes the whole
/// portfolio back before returning it. The store keeps no copy of its own and
/// has no rendering or event hooks: callers re-invoke it after each change.
#[must_use]
pub struct PortfolioStore<P: Persistence> {
    persistence: P,
    portfolio_service: PortfolioService,
    price_service: PriceService,
    valuation_service: ValuationService,
}

impl<P: Persistence> std::fmt::Debug for PortfolioStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioStore").finish_non_exhaustive()
    }
}

impl<P: Persistence> PortfolioStore<P> {
    pub fn new(persistence: P) -> Self {
        Self {
            persistence,
            portfolio_service: PortfolioService::new(),
            price_service: PriceService::new(),
            valuation_service: ValuationService::new(),
        }
    }

    /// The injected persistence slot.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Read the persisted portfolio.
    ///
    /// Never fails: a missing, unreadable or malformed document yields an
    /// empty portfolio.
    pub fn load(&self) -> Portfolio {
        let document = match self.persistence.read() {
            Ok(Some(document)) => document,
            Ok(None) => return Portfolio::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read portfolio, starting empty");
                return Portfolio::new();
            }
        };

        StorageManager::deserialize_portfolio(&document).unwrap_or_else(|e| {
            warn!(error = %e, "Persisted portfolio is malformed, starting empty");
            Portfolio::new()
        })
    }

    /// Record a buy: add a new holding or merge into the existing one
    /// (weighted-average cost basis), then persist.
    ///
    /// Invalid input is rejected with `CoreError::ValidationError` before
    /// anything is read or written. An unreadable or malformed document is
    /// returned as an error and left as it is.
    pub fn upsert(
        &self,
        id: &str,
        name: &str,
        amount: f64,
        unit_price: Option<f64>,
    ) -> Result<Portfolio, CoreError> {
        PortfolioService::validate_buy(id, amount, unit_price)?;

        let mut portfolio = self.read_for_update()?;
        self.portfolio_service
            .upsert(&mut portfolio, id, name, amount, unit_price)?;
        self.persist(&portfolio)?;

        info!(id = id.trim(), amount, holdings = portfolio.len(), "Buy recorded");
        Ok(portfolio)
    }

    /// Delete the holding with `id` and persist. Absent ids are a no-op.
    /// Read failures are returned without touching the slot, as in `upsert`.
    pub fn remove(&self, id: &str) -> Result<Portfolio, CoreError> {
        let mut portfolio = self.read_for_update()?;
        let removed = self.portfolio_service.remove(&mut portfolio, id);
        self.persist(&portfolio)?;

        info!(id, removed, holdings = portfolio.len(), "Holding removed");
        Ok(portfolio)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Value a portfolio against a price map. Pure; rows keep stored order.
    #[must_use]
    pub fn valuate(&self, portfolio: &Portfolio, prices: &PriceMap) -> ValuationReport {
        self.valuation_service.valuate(portfolio, prices)
    }

    /// Load, fetch current prices for the held ids, and valuate.
    ///
    /// A feed failure is logged and treated as "no prices", so this always
    /// produces a report.
    pub async fn refresh_valuation(
        &self,
        feed: &dyn PriceFeed,
        vs_currency: &str,
    ) -> ValuationReport {
        let portfolio = self.load();
        let prices = self
            .price_service
            .prices_or_empty(feed, &portfolio, vs_currency)
            .await;
        self.valuate(&portfolio, &prices)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Strict read used before a mutation: only a missing document counts
    /// as empty, so a bad slot is never overwritten.
    fn read_for_update(&self) -> Result<Portfolio, CoreError> {
        match self.persistence.read()? {
            Some(document) => StorageManager::deserialize_portfolio(&document),
            None => Ok(Portfolio::new()),
        }
    }

    fn persist(&self, portfolio: &Portfolio) -> Result<(), CoreError> {
        let document = StorageManager::serialize_portfolio(portfolio)?;
        self.persistence.write(&document)
    }
}
