//! Ticker source trait and structured error types.
//!
//! The TickerSource trait abstracts over where a dataset comes from (the HTTP
//! endpoint, a JSON file on disk, a fixed list in tests) so the dashboards can
//! swap implementations.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Ticker;

/// Single user-facing message for every fetch failure.
pub const UNAVAILABLE_MESSAGE: &str = "Error fetching data. Please try again later.";

/// Structured error types for data operations.
///
/// Logged in full; shown to users as [`UNAVAILABLE_MESSAGE`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl DataError {
    /// What the presentation layer shows, whatever the cause.
    pub fn user_message(&self) -> &'static str {
        UNAVAILABLE_MESSAGE
    }
}

/// Anything that can produce one dataset per call.
pub trait TickerSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the full ticker list in publication order.
    fn fetch(&self) -> Result<Vec<Ticker>, DataError>;
}

/// Tickers endpoint payload: `{ "data": [...], "info": {...} }`.
#[derive(Debug, Deserialize)]
struct TickersResponse {
    data: Vec<Ticker>,
}

/// Parse an endpoint payload. A bare array of tickers is accepted too.
pub fn parse_payload(body: &str) -> Result<Vec<Ticker>, DataError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("invalid JSON: {e}")))?;

    let tickers = if value.is_array() {
        serde_json::from_value::<Vec<Ticker>>(value)
    } else {
        serde_json::from_value::<TickersResponse>(value).map(|r| r.data)
    }
    .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;

    Ok(tickers)
}

/// In-memory source, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub tickers: Vec<Ticker>,
}

impl StaticSource {
    pub fn new(tickers: Vec<Ticker>) -> Self {
        Self { tickers }
    }
}

impl TickerSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<Ticker>, DataError> {
        Ok(self.tickers.clone())
    }
}
