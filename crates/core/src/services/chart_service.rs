use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::chart::ChartSeries;
use crate::models::history::HistorySeries;
use crate::providers::traits::PriceProvider;

/// Fetches the trailing daily history and shapes it for the chart.
///
/// History problems never reach the user as an error message: the
/// dashboard simply shows an empty chart until the next cycle.
pub struct ChartService {
    provider: Arc<dyn PriceProvider>,
    window: usize,
}

impl ChartService {
    pub fn new(provider: Arc<dyn PriceProvider>, window: usize) -> Self {
        Self { provider, window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Fetch the newest `window` daily closes, oldest first.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        currency: &str,
    ) -> Result<HistorySeries, CoreError> {
        let points = self
            .provider
            .get_daily_history(symbol, currency, self.window)
            .await?;
        Ok(HistorySeries::from_points(points, self.window))
    }

    /// Like `fetch_history`, but any failure yields an empty series.
    pub async fn fetch_chart(&self, symbol: &str, currency: &str) -> ChartSeries {
        match self.fetch_history(symbol, currency).await {
            Ok(history) => {
                if history.is_empty() {
                    log::warn!("History for {symbol}/{currency} is empty");
                }
                ChartSeries::from_history(&history, currency)
            }
            Err(e) => {
                log::warn!("History fetch for {symbol}/{currency} failed: {e}");
                ChartSeries::empty(currency)
            }
        }
    }
}
