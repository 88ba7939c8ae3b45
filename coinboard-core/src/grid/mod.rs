//! Data grid engine: search, sort, pagination, row selection, CSV export.
//!
//! The grid owns the dataset, the view state, and the selection set. Every
//! mutator is an explicit, synchronous transition; callers read the result
//! back through [`DataGrid::view`] or subscribe to [`GridEvent`]s.

pub mod engine;
pub mod export;
pub mod observer;
pub mod view;

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

pub use engine::DataGrid;
pub use export::{CsvExport, EXPORT_FILENAME, EXPORT_MIME};
pub use observer::{GridEvent, SubscriptionId};
pub use view::{GridView, ViewRow};

/// Errors raised by grid transitions. Everything not listed here is total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Selection is empty, please select some data first")]
    EmptySelection,

    #[error("invalid page size {0} (allowed: 10, 20, 30, 40, 50)")]
    InvalidPageSize(usize),

    #[error("failed to encode CSV: {0}")]
    Encode(String),
}

/// A single field value, borrowed from its record.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Integer(u64),
    Number(f64),
    /// A number that arrived as text: sorts by `value`, renders as `text`.
    Decimal { value: f64, text: &'a str },
    Empty,
}

impl Cell<'_> {
    /// String representation used for search, display, and export.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => (*s).to_string(),
            Cell::Integer(n) => n.to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Decimal { text, .. } => (*text).to_string(),
            Cell::Empty => String::new(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Number(n) | Cell::Decimal { value: n, .. } => Some(*n),
            Cell::Text(_) | Cell::Empty => None,
        }
    }

    /// Numeric cells compare numerically, text compares case-sensitively,
    /// empty cells sort before everything else.
    pub fn compare(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Empty, Cell::Empty) => Ordering::Equal,
            (Cell::Empty, _) => Ordering::Less,
            (_, Cell::Empty) => Ordering::Greater,
            (Cell::Integer(a), Cell::Integer(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.render().cmp(&b.render()),
            },
        }
    }
}

/// A record the grid can hold.
///
/// `cells` returns every field in record order; it drives search and export.
/// `cell` looks up a single column for sorting and rendering.
pub trait GridRow {
    type Column: Copy + Eq + fmt::Debug;

    /// Unique identifier within one dataset.
    fn row_id(&self) -> &str;

    fn cells(&self) -> Vec<Cell<'_>>;

    fn cell(&self, column: Self::Column) -> Cell<'_>;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort: a column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Rows per page. Only the enumerated sizes are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Thirty,
    Forty,
    Fifty,
}

impl PageSize {
    pub const OPTIONS: [PageSize; 5] = [
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Thirty,
        PageSize::Forty,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Thirty => 30,
            PageSize::Forty => 40,
            PageSize::Fifty => 50,
        }
    }

    /// Next larger option, saturating at the largest.
    pub fn larger(self) -> PageSize {
        let i = Self::OPTIONS.iter().position(|&p| p == self).unwrap_or(0);
        Self::OPTIONS[(i + 1).min(Self::OPTIONS.len() - 1)]
    }

    /// Next smaller option, saturating at the smallest.
    pub fn smaller(self) -> PageSize {
        let i = Self::OPTIONS.iter().position(|&p| p == self).unwrap_or(0);
        Self::OPTIONS[i.saturating_sub(1)]
    }
}

impl TryFrom<usize> for PageSize {
    type Error = GridError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::OPTIONS
            .into_iter()
            .find(|p| p.get() == size)
            .ok_or(GridError::InvalidPageSize(size))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
