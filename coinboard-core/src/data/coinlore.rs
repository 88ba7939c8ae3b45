//! HTTP provider for the public tickers endpoint.
//!
//! One GET per `fetch`. A failure is reported once, with no retry.

use std::time::Duration;

use tracing::{info, warn};

use super::provider::{parse_payload, DataError, TickerSource};
use crate::config::SourceConfig;
use crate::domain::Ticker;

pub const DEFAULT_URL: &str = "https://api.coinlore.net/api/tickers/";

/// Blocking client for the tickers endpoint.
pub struct CoinloreProvider {
    client: reqwest::blocking::Client,
    url: String,
}

impl CoinloreProvider {
    pub fn new(config: &SourceConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TickerSource for CoinloreProvider {
    fn name(&self) -> &str {
        "coinlore"
    }

    fn fetch(&self) -> Result<Vec<Ticker>, DataError> {
        info!(url = %self.url, "fetching tickers");

        let resp = self.client.get(&self.url).send().map_err(|e| {
            warn!(error = %e, "ticker request failed");
            DataError::NetworkUnreachable(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "ticker endpoint returned an error status");
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to read body: {e}")))?;
        let tickers = parse_payload(&body)?;
        info!(count = tickers.len(), "tickers fetched");
        Ok(tickers)
    }
}
