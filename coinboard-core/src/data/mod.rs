//! Data source adapters.

pub mod coinlore;
pub mod file;
pub mod provider;

pub use coinlore::CoinloreProvider;
pub use file::JsonFileSource;
pub use provider::{parse_payload, DataError, StaticSource, TickerSource, UNAVAILABLE_MESSAGE};
