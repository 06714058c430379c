use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::errors::{redact_query, CoreError};
use crate::models::history::HistoricalPoint;
use crate::models::settings::Settings;
use super::traits::PriceProvider;

pub const DEFAULT_BASE_URL: &str = "https://min-api.cryptocompare.com";

const PROVIDER: &str = "CryptoCompare";

/// CryptoCompare min-api provider.
///
/// - **Free**: works without an API key at low request rates.
/// - **Endpoints**: `/data/price` (spot), `/data/v2/histoday` (daily OHLC).
/// - **Auth**: optional key sent as `authorization: Apikey <key>`.
pub struct CryptoCompareProvider {
    client: Client,
    base_url: String,
}

impl CryptoCompareProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Apikey {key}"))
                .map_err(|_| CoreError::Config("API key contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Self::new(
            settings.api_base_url.clone(),
            settings.api_key.as_deref(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CoreError> {
        let url = format!("{}{path}", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!(
                    "Failed to parse response from {path}: {}",
                    redact_query(&e.to_string())
                ),
            })?;
        Ok(body)
    }
}

// ── CryptoCompare API response types ────────────────────────────────

#[derive(Deserialize)]
struct HistoDayResponse {
    #[serde(rename = "Data")]
    data: Option<HistoDayData>,
}

#[derive(Deserialize)]
struct HistoDayData {
    #[serde(rename = "Data")]
    data: Option<Vec<HistoDayPoint>>,
}

#[derive(Deserialize)]
struct HistoDayPoint {
    time: i64, // unix timestamp in seconds
    close: Option<f64>,
}

/// Reject `{"Response":"Error","Message":"..."}` bodies.
fn check_error_body(body: &Value) -> Result<(), CoreError> {
    if body.get("Response").and_then(Value::as_str) == Some("Error") {
        let message = body
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: message.to_string(),
        });
    }
    Ok(())
}

/// Extract the price for `currency` from a `/data/price` response body.
///
/// The body looks like `{"CHF": 0.5123}`. A missing or non-numeric entry
/// is a `MissingField` error.
pub fn parse_spot_response(body: &Value, currency: &str) -> Result<f64, CoreError> {
    check_error_body(body)?;
    let upper = currency.to_uppercase();
    body.get(&upper)
        .and_then(Value::as_f64)
        .ok_or(CoreError::MissingField { currency: upper })
}

/// Extract daily closes from a `/data/v2/histoday` response body.
///
/// Points without a close are skipped. A body without the nested
/// `Data.Data` list is a `MalformedHistory` error.
pub fn parse_history_response(body: Value) -> Result<Vec<HistoricalPoint>, CoreError> {
    check_error_body(&body)?;
    let resp: HistoDayResponse = serde_json::from_value(body)
        .map_err(|e| CoreError::MalformedHistory(e.to_string()))?;

    let raw = resp
        .data
        .and_then(|d| d.data)
        .ok_or_else(|| CoreError::MalformedHistory("missing Data.Data list".into()))?;

    let points = raw
        .into_iter()
        .filter_map(|p| {
            let close = p.close?;
            let time = chrono::DateTime::from_timestamp(p.time, 0)?;
            Some(HistoricalPoint { time, close })
        })
        .collect();

    Ok(points)
}

#[async_trait]
impl PriceProvider for CryptoCompareProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_spot_price(&self, symbol: &str, currency: &str) -> Result<f64, CoreError> {
        let body = self
            .get_json(
                "/data/price",
                &[
                    ("fsym", symbol.to_uppercase()),
                    ("tsyms", currency.to_uppercase()),
                ],
            )
            .await?;
        parse_spot_response(&body, currency)
    }

    async fn get_daily_history(
        &self,
        symbol: &str,
        currency: &str,
        limit: usize,
    ) -> Result<Vec<HistoricalPoint>, CoreError> {
        let body = self
            .get_json(
                "/data/v2/histoday",
                &[
                    ("fsym", symbol.to_uppercase()),
                    ("tsym", currency.to_uppercase()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        parse_history_response(body)
    }
}
