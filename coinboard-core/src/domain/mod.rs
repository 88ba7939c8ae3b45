//! Domain types: ticker records, their columns, and source-preserving amounts.

pub mod amount;
pub mod ticker;

pub use amount::Amount;
pub use ticker::{Ticker, TickerColumn};
