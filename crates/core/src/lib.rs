pub mod config;
pub mod errors;
pub mod models;
pub mod poller;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::{dashboard::DashboardState, quote::PriceQuote, settings::Settings};
use providers::{cryptocompare::CryptoCompareProvider, traits::PriceProvider};
use services::{
    chart_service::ChartService, metrics_service::MetricsCalculator,
    price_service::PriceService,
};
use storage::{
    manager::PreferenceManager,
    store::{FilePreferenceStore, PreferenceStore},
};

use errors::CoreError;

/// Main entry point for the xrp-earnings core library.
/// Holds the dashboard state and all services needed to refresh it.
#[must_use]
pub struct EarningsTracker {
    settings: Settings,
    state: DashboardState,
    price_service: PriceService,
    chart_service: ChartService,
    calculator: MetricsCalculator,
    preferences: PreferenceManager,
}

impl std::fmt::Debug for EarningsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EarningsTracker")
            .field("symbol", &self.settings.symbol)
            .field("currency", &self.state.currency)
            .field("provider", &self.price_service.provider_name())
            .field("loading", &self.state.is_loading())
            .field("dark_mode", &self.state.dark_mode)
            .finish()
    }
}

impl EarningsTracker {
    /// Build a tracker against the live CryptoCompare API, persisting
    /// preferences to `settings.preferences_path`.
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let provider = Arc::new(CryptoCompareProvider::from_settings(&settings)?);
        let store = Box::new(FilePreferenceStore::new(settings.preferences_path.clone()));
        Self::new(settings, provider, store)
    }

    /// Build a tracker from explicit parts.
    ///
    /// Reads the dark-mode preference once. No network request is made
    /// until the first `refresh`.
    pub fn new(
        mut settings: Settings,
        provider: Arc<dyn PriceProvider>,
        store: Box<dyn PreferenceStore>,
    ) -> Result<Self, CoreError> {
        settings.normalize();
        settings.validate()?;

        let calculator = MetricsCalculator::from_settings(&settings)?;
        let preferences = PreferenceManager::new(store);
        let dark_mode = preferences.load_dark_mode();
        let state = DashboardState::new(settings.default_currency.clone(), dark_mode);

        let tracker = Self {
            price_service: PriceService::new(Arc::clone(&provider)),
            chart_service: ChartService::new(provider, settings.history_days),
            calculator,
            preferences,
            state,
            settings,
        };
        tracker.warn_if_cross_currency();
        Ok(tracker)
    }

    // ── State ───────────────────────────────────────────────────────

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn currency(&self) -> &str {
        &self.state.currency
    }

    pub fn supported_currencies(&self) -> &[String] {
        &self.settings.supported_currencies
    }

    pub fn calculator(&self) -> &MetricsCalculator {
        &self.calculator
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// One poll cycle: fetch the spot price and the history concurrently,
    /// then apply both to the state.
    pub async fn refresh(&mut self) -> &DashboardState {
        let symbol = self.settings.symbol.clone();
        let currency = self.state.currency.clone();
        log::debug!("Refreshing {symbol}/{currency}");

        let (quote, chart) = tokio::join!(
            self.price_service.fetch_quote(&symbol, &currency),
            self.chart_service.fetch_chart(&symbol, &currency),
        );

        self.apply_quote(quote);
        self.state.chart = chart;
        &self.state
    }

    /// Fetch only the spot price and update metrics/error.
    pub async fn refresh_price(&mut self) -> &DashboardState {
        let quote = self
            .price_service
            .fetch_quote(&self.settings.symbol, &self.state.currency)
            .await;
        self.apply_quote(quote);
        &self.state
    }

    /// Fetch only the history and replace the chart.
    pub async fn refresh_history(&mut self) -> &DashboardState {
        self.state.chart = self
            .chart_service
            .fetch_chart(&self.settings.symbol, &self.state.currency)
            .await;
        &self.state
    }

    fn apply_quote(&mut self, quote: Result<PriceQuote, CoreError>) {
        match quote {
            Ok(quote) => {
                let metrics = self.calculator.compute(quote.price);
                self.state.apply_success(quote, metrics);
            }
            Err(e) => {
                log::error!(
                    "Error fetching {} price in {}: {e}",
                    self.settings.symbol,
                    self.state.currency
                );
                self.state.apply_failure(e.user_message());
            }
        }
    }

    // ── Currency Selection ──────────────────────────────────────────

    /// Switch the reference currency without fetching.
    ///
    /// Values in the previous currency are discarded, so the dashboard is
    /// loading until the next refresh. Quantity and baseline are unchanged.
    pub fn select_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let upper = currency.trim().to_uppercase();
        if !self.settings.is_supported_currency(&upper) {
            return Err(CoreError::Validation(format!(
                "Unsupported currency {upper} (expected one of {})",
                self.settings.supported_currencies.join(", ")
            )));
        }

        log::info!("Currency changed {} -> {upper}", self.state.currency);
        self.state.reset_for_currency(upper);
        self.warn_if_cross_currency();
        Ok(())
    }

    /// Switch the reference currency and immediately run one refresh.
    pub async fn set_currency(&mut self, currency: &str) -> Result<&DashboardState, CoreError> {
        self.select_currency(currency)?;
        Ok(self.refresh().await)
    }

    fn warn_if_cross_currency(&self) {
        if self.state.currency != self.settings.baseline_currency {
            log::warn!(
                "Baseline price is in {} but values are shown in {}; percentage change compares across currencies",
                self.settings.baseline_currency,
                self.state.currency
            );
        }
    }

    // ── Preferences ─────────────────────────────────────────────────

    /// Set and persist the dark-mode flag.
    /// The in-memory flag changes even if persisting fails.
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), CoreError> {
        self.state.dark_mode = enabled;
        self.preferences.save_dark_mode(enabled)
    }

    /// Flip and persist the dark-mode flag. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, CoreError> {
        let enabled = !self.state.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}
