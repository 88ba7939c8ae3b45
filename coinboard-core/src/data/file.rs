//! Load a tickers payload saved to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use super::provider::{parse_payload, DataError, TickerSource};
use crate::domain::Ticker;

/// Reads the endpoint payload (or a bare array) from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TickerSource for JsonFileSource {
    fn name(&self) -> &str {
        "json_file"
    }

    fn fetch(&self) -> Result<Vec<Ticker>, DataError> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| DataError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let tickers = parse_payload(&body)?;
        info!(path = %self.path.display(), count = tickers.len(), "tickers loaded from file");
        Ok(tickers)
    }
}
