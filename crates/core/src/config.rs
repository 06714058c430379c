//! Configuration loader
//!
//! Settings come from an optional TOML file, then environment overrides.
//! The result is normalized and validated before use.

use std::path::Path;

use crate::errors::CoreError;
use crate::models::settings::Settings;

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "xrp-earnings.toml";

pub const ENV_CURRENCY: &str = "XRP_EARNINGS_CURRENCY";
pub const ENV_QUANTITY: &str = "XRP_EARNINGS_QUANTITY";
pub const ENV_BASELINE: &str = "XRP_EARNINGS_BASELINE";
pub const ENV_INTERVAL_SECS: &str = "XRP_EARNINGS_INTERVAL_SECS";
pub const ENV_API_KEY: &str = "CRYPTOCOMPARE_API_KEY";

/// Load settings.
///
/// With `Some(path)` the file must exist. With `None`, `DEFAULT_CONFIG_PATH`
/// is used if present and defaults otherwise. Environment variables are
/// applied on top.
pub fn load(path: Option<&Path>) -> Result<Settings, CoreError> {
    let mut settings = match path {
        Some(path) => from_file(path)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                from_file(default)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.normalize();
    settings.validate()?;
    Ok(settings)
}

/// Parse a TOML file. Fields missing from the file take their defaults.
pub fn from_file(path: &Path) -> Result<Settings, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    from_toml_str(&contents)
}

pub fn from_toml_str(contents: &str) -> Result<Settings, CoreError> {
    Ok(toml::from_str(contents)?)
}

/// Apply overrides from `lookup` (normally the process environment).
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), CoreError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(currency) = lookup(ENV_CURRENCY) {
        settings.default_currency = currency;
    }
    if let Some(raw) = lookup(ENV_QUANTITY) {
        settings.quantity = parse_env(ENV_QUANTITY, &raw)?;
    }
    if let Some(raw) = lookup(ENV_BASELINE) {
        settings.baseline_price = parse_env(ENV_BASELINE, &raw)?;
    }
    if let Some(raw) = lookup(ENV_INTERVAL_SECS) {
        settings.poll_interval_secs = parse_env(ENV_INTERVAL_SECS, &raw)?;
    }
    if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
        settings.api_key = Some(key.trim().to_string());
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, CoreError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CoreError::Config(format!("{key}={raw:?} is invalid: {e}")))
}
