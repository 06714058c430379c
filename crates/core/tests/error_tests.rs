// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use xrp_earnings_core::errors::{redact_query, CoreError, FETCH_ERROR_MESSAGE};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn missing_field() {
        let err = CoreError::MissingField {
            currency: "CHF".into(),
        };
        assert_eq!(err.to_string(), "CHF price not available in response");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "CryptoCompare".into(),
            message: "rate limit".into(),
        };
        assert_eq!(err.to_string(), "API error (CryptoCompare): rate limit");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn malformed_history() {
        let err = CoreError::MalformedHistory("missing Data.Data list".into());
        assert_eq!(
            err.to_string(),
            "Malformed history payload: missing Data.Data list"
        );
    }

    #[test]
    fn invalid_price() {
        let err = CoreError::InvalidPrice { price: -1.5 };
        assert_eq!(
            err.to_string(),
            "Invalid price returned: -1.5 (must be finite and non-negative)"
        );
    }

    #[test]
    fn validation() {
        let err = CoreError::Validation("Unsupported currency JPY".into());
        assert_eq!(err.to_string(), "Validation failed: Unsupported currency JPY");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("poll_interval_secs must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: poll_interval_secs must be at least 1"
        );
    }

    #[test]
    fn poller_stopped() {
        assert_eq!(CoreError::PollerStopped.to_string(), "Poller is not running");
    }

    #[test]
    fn poller_busy_is_transient() {
        assert_eq!(
            CoreError::PollerBusy.to_string(),
            "Poller is busy; command dropped"
        );
        assert!(CoreError::PollerBusy.is_transient());
        assert!(!CoreError::PollerStopped.is_transient());
        assert!(!CoreError::PollerBusy.is_fetch_error());
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }
}

// ── User-visible messages ───────────────────────────────────────────

mod user_message {
    use super::*;

    #[test]
    fn fetch_errors_collapse_to_generic_message() {
        let errors = vec![
            CoreError::MissingField {
                currency: "USD".into(),
            },
            CoreError::Network("timeout".into()),
            CoreError::Api {
                provider: "CryptoCompare".into(),
                message: "market does not exist".into(),
            },
            CoreError::MalformedHistory("empty".into()),
            CoreError::InvalidPrice { price: f64::NAN },
        ];
        for err in errors {
            assert!(err.is_fetch_error(), "{err:?}");
            assert_eq!(err.user_message(), FETCH_ERROR_MESSAGE);
        }
    }

    #[test]
    fn other_errors_keep_their_text() {
        let err = CoreError::Validation("Unsupported currency JPY".into());
        assert!(!err.is_fetch_error());
        assert_eq!(err.user_message(), "Validation failed: Unsupported currency JPY");
    }

    #[test]
    fn generic_message_text() {
        assert_eq!(
            FETCH_ERROR_MESSAGE,
            "Unable to fetch data. Please try again later."
        );
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("denied")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("quantity = = 3").unwrap_err();
        let err: CoreError = toml_err.into();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}

// ── Query redaction ─────────────────────────────────────────────────

mod redaction {
    use super::*;

    #[test]
    fn strips_query_string() {
        let msg = "error sending request for url (https://min-api.cryptocompare.com/data/price?fsym=XRP&api_key=secret)";
        let redacted = redact_query(msg);
        assert!(!redacted.contains("secret"));
        assert_eq!(
            redacted,
            "error sending request for url (https://min-api.cryptocompare.com/data/price?<query redacted>)"
        );
    }

    #[test]
    fn leaves_messages_without_query_alone() {
        assert_eq!(redact_query("connection refused"), "connection refused");
    }

    #[test]
    fn query_at_end_of_message() {
        assert_eq!(
            redact_query("GET https://x.test/a?key=1"),
            "GET https://x.test/a?<query redacted>"
        );
    }
}
