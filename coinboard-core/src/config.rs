//! Dashboard configuration: TOML file with per-section defaults.
//!
//! ```toml
//! [source]
//! url = "https://api.coinlore.net/api/tickers/"
//! timeout_secs = 30
//!
//! [grid]
//! page_size = 10
//!
//! [chart]
//! top_n = 10
//! y_max = 70000.0
//!
//! [export]
//! dir = "."
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::coinlore::DEFAULT_URL;
use crate::dashboard::DEFAULT_TOP_N;
use crate::grid::PageSize;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub page_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default().get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub top_n: usize,
    /// Fixed y-axis ceiling. Unset means scale to the data.
    pub y_max: Option<f64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            y_max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// The complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub grid: GridConfig,
    pub chart: ChartConfig,
    pub export: ExportConfig,
}

impl Config {
    /// `<config_dir>/coinboard/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("coinboard").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.page_size()?;
        if self.chart.top_n == 0 {
            return Err(ConfigError::Invalid("chart.top_n must be at least 1".into()));
        }
        if let Some(y_max) = self.chart.y_max {
            if y_max.is_nan() || y_max <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "chart.y_max must be positive, got {y_max}"
                )));
            }
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn page_size(&self) -> Result<PageSize, ConfigError> {
        PageSize::try_from(self.grid.page_size).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.source.url, "https://api.coinlore.net/api/tickers/");
        assert_eq!(config.page_size().unwrap(), PageSize::Ten);
        assert_eq!(config.chart.top_n, 10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [grid]
            page_size = 30

            [chart]
            y_max = 70000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.page_size().unwrap(), PageSize::Thirty);
        assert_eq!(config.chart.y_max, Some(70000.0));
        assert_eq!(config.chart.top_n, 10);
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn rejects_page_size_outside_options() {
        let err = Config::from_toml("[grid]\npage_size = 25\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_top_n() {
        assert!(Config::from_toml("[chart]\ntop_n = 0\n").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Config::from_toml("not = [valid"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/coinboard/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\ndir = \"/tmp/exports\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.export.dir, PathBuf::from("/tmp/exports"));
    }
}
