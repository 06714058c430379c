use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::providers::cryptocompare::DEFAULT_BASE_URL;
use super::history::MAX_HISTORY_DAYS;

/// Product constants and runtime configuration.
///
/// Loaded from a TOML file by [`crate::config::load`]; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Asset whose price is tracked (e.g., "XRP").
    pub symbol: String,

    /// Fixed quantity of the asset held.
    pub quantity: f64,

    /// Reference purchase price used for the gain/loss percentage.
    pub baseline_price: f64,

    /// Currency `baseline_price` is denominated in.
    /// Not converted when another currency is selected.
    pub baseline_currency: String,

    /// Currency selected at startup.
    pub default_currency: String,

    /// Currencies the user may switch between.
    pub supported_currencies: Vec<String>,

    pub poll_interval_secs: u64,

    /// Number of daily closes in the history chart (1..=30).
    pub history_days: usize,

    pub api_base_url: String,

    /// Optional CryptoCompare API key.
    pub api_key: Option<String>,

    pub request_timeout_secs: u64,

    /// File holding the persisted dark-mode preference.
    pub preferences_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbol: "XRP".to_string(),
            quantity: 1450.914019,
            baseline_price: 0.6,
            baseline_currency: "USD".to_string(),
            default_currency: "USD".to_string(),
            supported_currencies: ["USD", "EUR", "CHF", "GBP"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            poll_interval_secs: 60,
            history_days: MAX_HISTORY_DAYS,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout_secs: 30,
            preferences_path: "preferences.json".to_string(),
        }
    }
}

impl Settings {
    /// Uppercase symbols and currency codes in place.
    pub fn normalize(&mut self) {
        self.symbol = self.symbol.trim().to_uppercase();
        self.baseline_currency = self.baseline_currency.trim().to_uppercase();
        self.default_currency = self.default_currency.trim().to_uppercase();
        for currency in &mut self.supported_currencies {
            *currency = currency.trim().to_uppercase();
        }
        let mut seen = HashSet::new();
        self.supported_currencies.retain(|c| seen.insert(c.clone()));
    }

    /// Check ranges and cross-field consistency.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.is_empty() {
            return Err(CoreError::Config("symbol must not be empty".into()));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(CoreError::Config(format!(
                "quantity must be finite and non-negative, got {}",
                self.quantity
            )));
        }
        if !self.baseline_price.is_finite() || self.baseline_price <= 0.0 {
            return Err(CoreError::Config(format!(
                "baseline_price must be finite and positive, got {}",
                self.baseline_price
            )));
        }
        if self.supported_currencies.is_empty() {
            return Err(CoreError::Config(
                "supported_currencies must list at least one currency".into(),
            ));
        }
        if !self.is_supported_currency(&self.default_currency) {
            return Err(CoreError::Config(format!(
                "default_currency {} is not in supported_currencies",
                self.default_currency
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(CoreError::Config("poll_interval_secs must be at least 1".into()));
        }
        if !(1..=MAX_HISTORY_DAYS).contains(&self.history_days) {
            return Err(CoreError::Config(format!(
                "history_days out of range: {} (expected 1..={MAX_HISTORY_DAYS})",
                self.history_days
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be at least 1".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::Config("api_base_url must not be empty".into()));
        }
        Ok(())
    }

    /// Case-insensitive membership check against `supported_currencies`.
    pub fn is_supported_currency(&self, currency: &str) -> bool {
        let upper = currency.trim().to_uppercase();
        self.supported_currencies.iter().any(|c| c == &upper)
    }
}
