use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The latest spot price of the tracked asset in one reference currency.
///
/// Transient: overwritten on every successful poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Asset symbol, uppercased (e.g., "XRP")
    pub symbol: String,

    /// Reference currency, uppercased (e.g., "USD", "CHF")
    pub currency: String,

    /// Unit price of `symbol` in `currency`
    pub price: f64,

    /// When the quote was received
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>, currency: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            currency: currency.into().to_uppercase(),
            price,
            fetched_at: Utc::now(),
        }
    }
}
