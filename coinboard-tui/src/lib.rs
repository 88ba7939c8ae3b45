//! Coinboard TUI: terminal dashboard over the ticker grid.
//!
//! Panels:
//! 1. Table: searchable, sortable, paginated tickers with row selection and CSV export
//! 2. Cards: gallery arranged by rank
//! 3. Chart: top coins by USD price
//! 4. Help: keyboard shortcuts

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::{AppState, LoadState, Panel};

#[cfg(test)]
mod test_helpers;
