use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::CoreError;

/// Default CoinGecko public API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Slot name the browser dashboard used for its local-storage document.
pub const DEFAULT_STORAGE_KEY: &str = "cryptoPortfolio";

/// Prefix for environment variable overrides (e.g. `CRYPTO_DASHBOARD_VS_CURRENCY`).
pub const ENV_PREFIX: &str = "CRYPTO_DASHBOARD_";

/// Runtime settings for the dashboard: where prices come from and where the
/// portfolio document lives.
///
/// Loaded from an optional TOML file, then overridden field by field from
/// `CRYPTO_DASHBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quote currency for all prices (lowercase, e.g., "usd", "eur").
    pub vs_currency: String,

    /// Root URL of the CoinGecko-compatible API.
    pub api_base_url: String,

    /// Optional CoinGecko demo API key, sent as `x-cg-demo-api-key`.
    pub api_key: Option<String>,

    /// Directory holding the persisted portfolio document.
    pub data_dir: PathBuf,

    /// Name of the persisted slot (file stem inside `data_dir`).
    pub storage_key: String,

    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("crypto-dashboard"))
        .unwrap_or_else(|| PathBuf::from(".crypto-dashboard"))
}

impl Settings {
    /// Parse settings from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Load settings: file (if given), then process environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut settings = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    CoreError::Config(format!("Failed to read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        settings.apply_overrides(|name| std::env::var(name).ok());
        settings.validate()?;

        info!(
            vs_currency = %settings.vs_currency,
            data_dir = %settings.data_dir.display(),
            storage_key = %settings.storage_key,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |field: &str| {
            lookup(&format!("{ENV_PREFIX}{field}")).filter(|v| !v.trim().is_empty())
        };

        if let Some(v) = get("VS_CURRENCY") {
            self.vs_currency = v;
        }
        if let Some(v) = get("API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = get("API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = get("DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("STORAGE_KEY") {
            self.storage_key = v;
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.log_level = v;
        }
        debug!("Environment overrides applied");
    }

    /// Normalise and check every field.
    ///
    /// - `vs_currency`: 3..=10 ASCII alphanumerics, lowercased
    /// - `api_base_url`: http(s) URL, trailing slash removed
    /// - `storage_key`: non-empty, no path separators
    pub fn validate(&mut self) -> Result<(), CoreError> {
        self.vs_currency = normalize_currency(&self.vs_currency)?;

        let base = self.api_base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                self.api_base_url
            )));
        }
        self.api_base_url = base.to_string();

        let key = self.storage_key.trim();
        if key.is_empty() || key.contains(|c| c == '/' || c == '\\') || key.contains("..") {
            return Err(CoreError::Config(format!(
                "storage_key must be a plain non-empty name (got '{}')",
                self.storage_key
            )));
        }
        self.storage_key = key.to_string();

        Ok(())
    }
}

/// Lowercase and check a quote currency code ("USD" → "usd").
pub fn normalize_currency(currency: &str) -> Result<String, CoreError> {
    let trimmed = currency.trim().to_lowercase();
    if !(3..=10).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Config(format!(
            "Invalid quote currency '{currency}': expected 3-10 letters or digits (e.g., usd, eur, btc)"
        )));
    }
    Ok(trimmed)
}
