// ═══════════════════════════════════════════════════════════════════
// Settings Tests — TOML parsing, env overrides and validation
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;

use crypto_dashboard_core::errors::CoreError;
use crypto_dashboard_core::models::settings::{
    normalize_currency, Settings, DEFAULT_API_BASE_URL, DEFAULT_STORAGE_KEY,
};

// ═══════════════════════════════════════════════════════════════════
// Defaults and TOML
// ═══════════════════════════════════════════════════════════════════

mod parsing {
    use super::*;

    #[test]
    fn defaults_match_browser_dashboard() {
        let s = Settings::default();
        assert_eq!(s.vs_currency, "usd");
        assert_eq!(s.storage_key, "cryptoPortfolio");
        assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
        assert!(s.api_key.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml_str("vs_currency = \"eur\"\n").unwrap();
        assert_eq!(s.vs_currency, "eur");
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Settings::from_toml_str("vs_currency = ").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Environment overrides
// ═══════════════════════════════════════════════════════════════════

mod overrides {
    use super::*;

    #[test]
    fn overrides_replace_fields_and_skip_blanks() {
        let vars: HashMap<String, String> = [
            ("CRYPTO_DASHBOARD_VS_CURRENCY", "EUR"),
            ("CRYPTO_DASHBOARD_API_KEY", "demo-key"),
            ("CRYPTO_DASHBOARD_STORAGE_KEY", "  "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut s = Settings::default();
        s.apply_overrides(|name| vars.get(name).cloned());
        assert_eq!(s.vs_currency, "EUR");
        assert_eq!(s.api_key.as_deref(), Some("demo-key"));
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);

        s.validate().unwrap();
        assert_eq!(s.vs_currency, "eur");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn validate_trims_trailing_slash() {
        let mut s = Settings {
            api_base_url: "https://example.com/api/v3/".into(),
            ..Settings::default()
        };
        s.validate().unwrap();
        assert_eq!(s.api_base_url, "https://example.com/api/v3");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut bad_url = Settings {
            api_base_url: "ftp://example.com".into(),
            ..Settings::default()
        };
        assert!(bad_url.validate().is_err());

        let mut bad_key = Settings {
            storage_key: "../escape".into(),
            ..Settings::default()
        };
        assert!(bad_key.validate().is_err());

        let mut bad_currency = Settings {
            vs_currency: "u$".into(),
            ..Settings::default()
        };
        assert!(bad_currency.validate().is_err());
    }

    #[test]
    fn currency_is_trimmed_and_lowercased() {
        assert_eq!(normalize_currency(" EUR ").unwrap(), "eur");
        assert!(matches!(normalize_currency("x"), Err(CoreError::Config(_))));
    }
}
