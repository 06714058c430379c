use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use xrp_earnings_core::config;
use xrp_earnings_core::errors::CoreError;
use xrp_earnings_core::models::settings::Settings;
use xrp_earnings_core::poller::{PollEvent, PollerHandle, PricePoller};
use xrp_earnings_core::storage::manager::PreferenceManager;
use xrp_earnings_core::storage::store::FilePreferenceStore;
use xrp_earnings_core::EarningsTracker;

mod cli;
mod input;
mod render;
mod ui;

use input::{parse_input, Input};

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger; quiet by default so it does not tear the dashboard
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();
    let cli = cli::Cli::parse();
    log::debug!("Command line input recorded: {cli:#?}");

    let settings = config::load(cli.config.as_deref())?;

    match &cli.command {
        // "> xrp-earnings watch [--currency CUR]"
        cli::Commands::Watch { currency } => watch(settings, currency.as_deref()).await?,

        // "> xrp-earnings once [--currency CUR]"
        cli::Commands::Once { currency } => {
            let mut tracker = tracker_for(settings, currency.as_deref())?;
            let spinner = ui::loading_spinner("Fetching price...");
            tracker.refresh().await;
            spinner.finish_and_clear();
            print!(
                "{}",
                render::render_dashboard(tracker.state(), tracker.supported_currencies())
            );
        }

        // "> xrp-earnings history [--currency CUR]"
        cli::Commands::History { currency } => {
            let mut tracker = tracker_for(settings, currency.as_deref())?;
            let spinner = ui::loading_spinner("Fetching history...");
            tracker.refresh_history().await;
            spinner.finish_and_clear();
            print!("{}", render::render_history_table(&tracker.state().chart));
        }

        // "> xrp-earnings dark-mode [on off toggle show]"
        cli::Commands::DarkMode { action } => {
            use cli::DarkModeArgs::*;

            let store = FilePreferenceStore::new(settings.preferences_path.clone());
            let mut preferences = PreferenceManager::new(Box::new(store));
            let enabled = match action {
                On => true,
                Off => false,
                Toggle => !preferences.load_dark_mode(),
                Show => preferences.load_dark_mode(),
            };
            if *action != Show {
                preferences.save_dark_mode(enabled)?;
            }
            println!("dark mode: {}", if enabled { "on" } else { "off" });
        }
    }

    Ok(())
}

fn tracker_for(settings: Settings, currency: Option<&str>) -> Result<EarningsTracker> {
    let mut tracker = EarningsTracker::from_settings(settings)?;
    if let Some(currency) = currency {
        tracker.select_currency(currency)?;
    }
    Ok(tracker)
}

/// Interactive loop: redraw on every poller event, forward typed commands.
async fn watch(settings: Settings, currency: Option<&str>) -> Result<()> {
    let tracker = tracker_for(settings, currency)?;
    let supported = tracker.supported_currencies().to_vec();
    let mut poller = PricePoller::spawn_with_settings(tracker);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut spinner = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = poller.next_event() => match event {
                Some(PollEvent::Loading(state)) => {
                    if state.is_loading() && spinner.is_none() {
                        spinner = Some(ui::loading_spinner("Loading..."));
                    }
                }
                Some(PollEvent::Updated(_)) => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    ui::clear_screen();
                    print!("{}", render::render_dashboard(&poller.latest(), &supported));
                    println!("(currency code to switch, r refresh, d dark mode, q quit)");
                    std::io::stdout().flush()?;
                }
                Some(PollEvent::Rejected(message)) => eprintln!("{message}"),
                Some(PollEvent::Stopped) | None => break,
            },

            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if !dispatch(&poller, parse_input(&line))? {
                        break;
                    }
                }
                // stdin closed: keep polling until Ctrl-C
                None => stdin_open = false,
            },

            _ = &mut ctrl_c => break,
        }
    }

    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    poller.stop().await;
    Ok(())
}

/// Forward one typed command to the poller. `false` means quit.
fn dispatch(poller: &PollerHandle, input: Input) -> Result<bool, CoreError> {
    let sent = match input {
        Input::Quit => return Ok(false),
        Input::Refresh => poller.refresh_now(),
        Input::ToggleDarkMode => poller.toggle_dark_mode(),
        Input::Currency(code) => poller.change_currency(code),
        Input::Empty => Ok(()),
    };
    skip_transient(sent)?;
    Ok(true)
}

/// A command refused for a transient reason (full queue) is logged and skipped.
fn skip_transient(result: Result<(), CoreError>) -> Result<(), CoreError> {
    match result {
        Err(e) if e.is_transient() => {
            log::warn!("Ignoring command: {e}");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_poller_does_not_end_the_session() {
        assert!(skip_transient(Err(CoreError::PollerBusy)).is_ok());
        assert!(skip_transient(Ok(())).is_ok());
    }

    #[test]
    fn stopped_poller_is_still_an_error() {
        assert!(matches!(
            skip_transient(Err(CoreError::PollerStopped)),
            Err(CoreError::PollerStopped)
        ));
    }
}
