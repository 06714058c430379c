use crate::errors::CoreError;
use crate::models::metrics::DerivedMetrics;
use crate::models::settings::Settings;

/// Turns a spot price into earnings and percentage change.
///
/// Pure: the same price always yields the same metrics. No rounding is
/// applied here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsCalculator {
    quantity: f64,
    baseline_price: f64,
}

impl MetricsCalculator {
    pub fn new(quantity: f64, baseline_price: f64) -> Result<Self, CoreError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(CoreError::Config(format!(
                "quantity must be finite and non-negative, got {quantity}"
            )));
        }
        if !baseline_price.is_finite() || baseline_price <= 0.0 {
            return Err(CoreError::Config(format!(
                "baseline price must be finite and positive, got {baseline_price}"
            )));
        }
        Ok(Self {
            quantity,
            baseline_price,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Self::new(settings.quantity, settings.baseline_price)
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn baseline_price(&self) -> f64 {
        self.baseline_price
    }

    /// price × quantity
    #[must_use]
    pub fn earnings(&self, price: f64) -> f64 {
        price * self.quantity
    }

    /// (price − baseline) / baseline × 100
    #[must_use]
    pub fn percentage_change(&self, price: f64) -> f64 {
        (price - self.baseline_price) / self.baseline_price * 100.0
    }

    #[must_use]
    pub fn compute(&self, price: f64) -> DerivedMetrics {
        DerivedMetrics {
            earnings: self.earnings(price),
            percentage_change: self.percentage_change(price),
        }
    }
}
