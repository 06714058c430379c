use serde::{Deserialize, Serialize};

use super::history::HistorySeries;

/// Label/value series ready for chart rendering.
///
/// The core shapes the numbers; the presentation layer only draws them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Currency the values are denominated in
    pub currency: String,

    /// One label per point (UTC date, `YYYY-MM-DD`)
    pub labels: Vec<String>,

    /// Closing prices, aligned with `labels`
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn empty(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn from_history(history: &HistorySeries, currency: impl Into<String>) -> Self {
        let (labels, values) = history
            .points()
            .iter()
            .map(|p| (p.time.format("%Y-%m-%d").to_string(), p.close))
            .unzip();
        Self {
            currency: currency.into(),
            labels,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (min, max) of the values, `None` for an empty series.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
