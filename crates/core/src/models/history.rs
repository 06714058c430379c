use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of daily points the upstream history window covers.
pub const MAX_HISTORY_DAYS: usize = 30;

/// One daily closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub time: DateTime<Utc>,
    pub close: f64,
}

/// Daily closing prices, oldest first, never longer than its window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    points: Vec<HistoricalPoint>,
}

impl HistorySeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from raw upstream points.
    ///
    /// Drops points with a non-finite or negative close, orders them by time
    /// and keeps only the newest `window` entries.
    pub fn from_points(mut points: Vec<HistoricalPoint>, window: usize) -> Self {
        points.retain(|p| p.close.is_finite() && p.close >= 0.0);
        points.sort_by_key(|p| p.time);
        if points.len() > window {
            points.drain(..points.len() - window);
        }
        Self { points }
    }

    pub fn points(&self) -> &[HistoricalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent closing price, if any.
    pub fn latest(&self) -> Option<&HistoricalPoint> {
        self.points.last()
    }
}
