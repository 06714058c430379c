use thiserror::Error;

/// Message shown to the user whenever the price fetch path fails.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch data. Please try again later.";

/// Unified error type for the entire xrp-earnings-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("{currency} price not available in response")]
    MissingField { currency: String },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed history payload: {0}")]
    MalformedHistory(String),

    #[error("Invalid price returned: {price} (must be finite and non-negative)")]
    InvalidPrice { price: f64 },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Poller is not running")]
    PollerStopped,

    #[error("Poller is busy; command dropped")]
    PollerBusy,

    // ── Preferences / File I/O ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// Whether this error came from the price/history fetch path.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CoreError::MissingField { .. }
                | CoreError::Api { .. }
                | CoreError::Network(_)
                | CoreError::MalformedHistory(_)
                | CoreError::InvalidPrice { .. }
        )
    }

    /// Whether the same call may succeed later without any change.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::PollerBusy)
    }

    /// The string shown to the user for this error.
    /// Fetch errors collapse into a single generic message; the detail goes to the log.
    pub fn user_message(&self) -> String {
        if self.is_fetch_error() {
            FETCH_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip query parameters from any URL inside `msg`.
/// reqwest errors carry the full request URL, which may include an API key.
pub fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => {
            let rest = &msg[idx..];
            let tail = rest
                .find(|c: char| c == ')' || c.is_whitespace())
                .map(|end| &rest[end..])
                .unwrap_or("");
            format!("{}?<query redacted>{}", &msg[..idx], tail)
        }
        None => msg.to_string(),
    }
}
