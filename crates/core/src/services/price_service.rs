use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::providers::traits::PriceProvider;

/// Fetches spot quotes from the configured provider.
///
/// No caching and no retry: a failed fetch is reported to the caller and
/// the next poll cycle simply tries again.
pub struct PriceService {
    provider: Arc<dyn PriceProvider>,
}

impl PriceService {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch the current price of `symbol` in `currency`.
    /// Rejects prices that are not finite or are negative.
    pub async fn fetch_quote(&self, symbol: &str, currency: &str) -> Result<PriceQuote, CoreError> {
        let price = self.provider.get_spot_price(symbol, currency).await?;

        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::InvalidPrice { price });
        }

        log::debug!(
            "{} quote: 1 {} = {} {}",
            self.provider.name(),
            symbol.to_uppercase(),
            price,
            currency.to_uppercase()
        );
        Ok(PriceQuote::new(symbol, currency, price))
    }
}
