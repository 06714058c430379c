use serde::{Deserialize, Serialize};

use super::chart::ChartSeries;
use super::metrics::DerivedMetrics;
use super::quote::PriceQuote;

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Currently selected reference currency
    pub currency: String,

    /// Last successful quote in `currency`
    pub quote: Option<PriceQuote>,

    /// Metrics derived from `quote`; `None` until the first successful poll
    pub metrics: Option<DerivedMetrics>,

    /// User-visible error from the most recent poll
    pub error: Option<String>,

    /// 30-day closing price chart in `currency`
    pub chart: ChartSeries,

    pub dark_mode: bool,
}

impl DashboardState {
    pub fn new(currency: impl Into<String>, dark_mode: bool) -> Self {
        let currency = currency.into();
        Self {
            chart: ChartSeries::empty(currency.clone()),
            currency,
            quote: None,
            metrics: None,
            error: None,
            dark_mode,
        }
    }

    /// Loading until metrics exist.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.metrics.is_none()
    }

    /// Record a successful quote: metrics replace the old ones and the error clears.
    pub fn apply_success(&mut self, quote: PriceQuote, metrics: DerivedMetrics) {
        self.quote = Some(quote);
        self.metrics = Some(metrics);
        self.error = None;
    }

    /// Record a failed poll. Previous metrics are kept.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Switch currency, discarding values denominated in the old one.
    pub fn reset_for_currency(&mut self, currency: impl Into<String>) {
        let currency = currency.into();
        self.quote = None;
        self.metrics = None;
        self.error = None;
        self.chart = ChartSeries::empty(currency.clone());
        self.currency = currency;
    }
}
