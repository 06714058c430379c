use serde::{Deserialize, Serialize};

/// Direction of the change relative to the baseline price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Gain,
    Loss,
}

impl Trend {
    /// Zero counts as a gain.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 0.0 {
            Trend::Gain
        } else {
            Trend::Loss
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Gain => write!(f, "Gain"),
            Trend::Loss => write!(f, "Loss"),
        }
    }
}

/// Values derived from a single price quote.
///
/// Both fields are always computed from the same price, so they can never
/// disagree about which poll they came from. Values are unrounded; rounding
/// to two decimals happens only in the `format_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// price × fixed quantity
    pub earnings: f64,

    /// (price − baseline) / baseline × 100
    pub percentage_change: f64,
}

impl DerivedMetrics {
    #[must_use]
    pub fn trend(&self) -> Trend {
        Trend::from_percentage(self.percentage_change)
    }

    /// e.g. `"CHF 2901.83"`
    #[must_use]
    pub fn format_earnings(&self, currency: &str) -> String {
        format!("{} {:.2}", currency, self.earnings)
    }

    /// e.g. `"233.33% Gain"`
    #[must_use]
    pub fn format_percentage(&self) -> String {
        format!("{:.2}% {}", self.percentage_change, self.trend())
    }
}
