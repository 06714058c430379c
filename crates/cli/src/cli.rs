use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML config file (defaults to ./xrp-earnings.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the dashboard live, refreshing on the configured interval.
    ///
    /// While running, type a currency code to switch currency,
    /// `r` to refresh, `d` to toggle dark mode, `q` to quit.
    Watch {
        #[arg(long)]
        currency: Option<String>,
    },

    /// Fetch once, print the dashboard and exit.
    Once {
        #[arg(long)]
        currency: Option<String>,
    },

    /// Print the daily closing prices used for the chart.
    History {
        #[arg(long)]
        currency: Option<String>,
    },

    /// Read or change the persisted dark-mode preference.
    DarkMode {
        action: DarkModeArgs,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DarkModeArgs {
    On,
    Off,
    Toggle,
    Show,
}
