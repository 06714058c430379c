use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::history::HistoricalPoint;

/// Trait abstraction for market data providers.
///
/// The poller and services only see this trait, so the upstream API can be
/// swapped (or mocked in tests) without touching the refresh logic.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current spot price of `symbol` in `currency`.
    ///
    /// Returns `CoreError::MissingField` when the response carries no price
    /// for the requested currency.
    async fn get_spot_price(&self, symbol: &str, currency: &str) -> Result<f64, CoreError>;

    /// Get up to `limit` most recent daily closes, oldest first.
    async fn get_daily_history(
        &self,
        symbol: &str,
        currency: &str,
        limit: usize,
    ) -> Result<Vec<HistoricalPoint>, CoreError>;
}
