//! Coinboard Core: ticker domain types, data grid engine, data sources.
//!
//! This crate contains everything the dashboards share:
//! - Ticker records and their column set
//! - The data grid engine (search, sort, pagination, selection, CSV export)
//! - Data source adapters (HTTP endpoint, JSON file)
//! - Derived presentation data (top-N price series, ranked gallery)
//! - TOML configuration

pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod grid;

pub use config::{Config, ConfigError};
pub use data::{DataError, TickerSource};
pub use domain::{Amount, Ticker, TickerColumn};
pub use grid::{DataGrid, GridError, GridView, PageSize, SortDirection, SortSpec};
