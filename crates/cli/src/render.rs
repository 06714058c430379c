use colored::{ColoredString, Colorize};
use xrp_earnings_core::models::chart::ChartSeries;
use xrp_earnings_core::models::dashboard::DashboardState;
use xrp_earnings_core::models::metrics::Trend;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_HISTORY_TEXT: &str = "No history available";

/// Colours for one of the two display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    fn heading(&self, text: &str) -> ColoredString {
        if self.dark {
            text.bright_white().bold()
        } else {
            text.black().bold()
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        if self.dark {
            text.bright_black()
        } else {
            text.dimmed()
        }
    }

    fn accent(&self, text: &str) -> ColoredString {
        if self.dark {
            text.bright_cyan()
        } else {
            text.blue()
        }
    }

    fn trend(&self, text: &str, trend: Trend) -> ColoredString {
        match trend {
            Trend::Gain => text.truecolor(40, 167, 69).bold(),
            Trend::Loss => text.truecolor(220, 53, 69).bold(),
        }
    }

    fn error(&self, text: &str) -> ColoredString {
        text.red().bold()
    }
}

/// The full dashboard frame: error, earnings, change, chart and currency list.
pub fn render_dashboard(state: &DashboardState, supported: &[String]) -> String {
    let theme = Theme::new(state.dark_mode);
    let mut out = String::new();

    if let Some(error) = &state.error {
        out.push_str(&format!("{}\n\n", theme.error(error)));
    }

    match &state.metrics {
        Some(metrics) => {
            out.push_str(&format!(
                "{}\n",
                theme.heading(&metrics.format_earnings(&state.currency))
            ));
            out.push_str(&format!(
                "{}\n",
                theme.trend(&metrics.format_percentage(), metrics.trend())
            ));
        }
        None => {
            out.push_str(&format!("{}\n", theme.heading(LOADING_TEXT)));
            out.push_str(&format!("{}\n", theme.muted(LOADING_TEXT)));
        }
    }

    if let Some(quote) = &state.quote {
        out.push_str(&format!(
            "{}\n",
            theme.muted(&format!(
                "1 {} = {} {} (as of {})",
                quote.symbol,
                quote.price,
                quote.currency,
                quote.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
        ));
    }

    out.push('\n');
    out.push_str(&render_chart(&state.chart, &theme));
    out.push('\n');
    out.push_str(&render_currency_bar(&state.currency, supported, &theme));
    out.push('\n');
    out
}

/// One-line sparkline with range and date span, or a placeholder.
pub fn render_chart(chart: &ChartSeries, theme: &Theme) -> String {
    let Some((min, max)) = chart.range() else {
        return format!("{}\n", theme.muted(NO_HISTORY_TEXT));
    };

    let line = sparkline(&chart.values);
    let first = chart.labels.first().map(String::as_str).unwrap_or("");
    let last = chart.labels.last().map(String::as_str).unwrap_or("");

    format!(
        "{}\n{}\n{}\n",
        theme.heading(&format!("{}-day price ({})", chart.len(), chart.currency)),
        theme.accent(&line),
        theme.muted(&format!("{first} … {last}   low {min:.4}  high {max:.4}")),
    )
}

/// Map each value onto one of eight block heights.
/// A flat series renders at mid height.
pub fn sparkline(values: &[f64]) -> String {
    let Some((min, max)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return String::new();
    };

    let span = max - min;
    let top = (SPARK_CHARS.len() - 1) as f64;
    values
        .iter()
        .map(|&v| {
            let idx = if span > 0.0 {
                ((v - min) / span * top).round() as usize
            } else {
                SPARK_CHARS.len() / 2 - 1
            };
            SPARK_CHARS[idx.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

fn render_currency_bar(current: &str, supported: &[String], theme: &Theme) -> String {
    let items: Vec<String> = supported
        .iter()
        .map(|c| {
            if c == current {
                theme.accent(&format!("[{c}]")).to_string()
            } else {
                theme.muted(c).to_string()
            }
        })
        .collect();
    format!("{} {}\n", theme.muted("Currency:"), items.join(" "))
}

/// Date/close table for the `history` command.
pub fn render_history_table(chart: &ChartSeries) -> String {
    if chart.is_empty() {
        return format!("{NO_HISTORY_TEXT}\n");
    }
    let mut out = format!("{:<12} {:>14}\n", "date", format!("close ({})", chart.currency));
    for (label, value) in chart.labels.iter().zip(&chart.values) {
        out.push_str(&format!("{label:<12} {value:>14.4}\n"));
    }
    out
}
