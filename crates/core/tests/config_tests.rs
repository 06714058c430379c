// ═══════════════════════════════════════════════════════════════════
// Config Tests — TOML loading, environment overrides
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;

use xrp_earnings_core::config::{
    self, apply_env_overrides, from_toml_str, ENV_API_KEY, ENV_BASELINE, ENV_CURRENCY,
    ENV_INTERVAL_SECS, ENV_QUANTITY,
};
use xrp_earnings_core::errors::CoreError;
use xrp_earnings_core::models::settings::Settings;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

mod toml_parsing {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let s = from_toml_str(
            r#"
            quantity = 950.914019
            baseline_price = 0.71
            baseline_currency = "CHF"
            default_currency = "CHF"
            "#,
        )
        .unwrap();
        assert_eq!(s.quantity, 950.914019);
        assert_eq!(s.baseline_price, 0.71);
        assert_eq!(s.default_currency, "CHF");
        assert_eq!(s.symbol, "XRP");
        assert_eq!(s.poll_interval_secs, 60);
    }

    #[test]
    fn full_file() {
        let s = from_toml_str(
            r#"
            symbol = "XRP"
            quantity = 10.0
            baseline_price = 1.5
            baseline_currency = "EUR"
            default_currency = "EUR"
            supported_currencies = ["EUR", "USD"]
            poll_interval_secs = 30
            history_days = 14
            api_base_url = "http://localhost:8080"
            api_key = "k"
            request_timeout_secs = 10
            preferences_path = "/tmp/prefs.json"
            "#,
        )
        .unwrap();
        assert_eq!(s.supported_currencies, vec!["EUR", "USD"]);
        assert_eq!(s.history_days, 14);
        assert_eq!(s.api_key.as_deref(), Some("k"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn wrong_type_is_config_error() {
        assert!(matches!(
            from_toml_str("quantity = \"lots\""),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            config::load(Some(missing.as_path())),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "baseline_price = 0.0\n").unwrap();
        assert!(matches!(config::load(Some(path.as_path())), Err(CoreError::Config(_))));
    }
}

mod env_overrides {
    use super::*;

    #[test]
    fn no_variables_changes_nothing() {
        let mut s = Settings::default();
        apply_env_overrides(&mut s, env(&[])).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn overrides_each_field() {
        let mut s = Settings::default();
        apply_env_overrides(
            &mut s,
            env(&[
                (ENV_CURRENCY, "CHF"),
                (ENV_QUANTITY, "950.914019"),
                (ENV_BASELINE, " 0.71 "),
                (ENV_INTERVAL_SECS, "15"),
                (ENV_API_KEY, "secret"),
            ]),
        )
        .unwrap();
        assert_eq!(s.default_currency, "CHF");
        assert_eq!(s.quantity, 950.914019);
        assert_eq!(s.baseline_price, 0.71);
        assert_eq!(s.poll_interval_secs, 15);
        assert_eq!(s.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let mut s = Settings::default();
        apply_env_overrides(&mut s, env(&[(ENV_API_KEY, "  ")])).unwrap();
        assert!(s.api_key.is_none());
    }

    #[test]
    fn unparseable_number_is_config_error() {
        let mut s = Settings::default();
        let result = apply_env_overrides(&mut s, env(&[(ENV_QUANTITY, "many")]));
        match result {
            Err(CoreError::Config(msg)) => assert!(msg.contains(ENV_QUANTITY)),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
