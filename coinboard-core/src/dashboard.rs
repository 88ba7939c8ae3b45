//! Derived data for the gallery and the chart.
//!
//! Both work on copies of the dataset order; the dataset itself is never
//! reordered.

use crate::domain::Ticker;

pub const DEFAULT_TOP_N: usize = 10;

/// The `n` highest-priced tickers, most expensive first. Equal prices keep
/// dataset order.
pub fn top_by_price(records: &[Ticker], n: usize) -> Vec<&Ticker> {
    let mut sorted: Vec<&Ticker> = records.iter().collect();
    sorted.sort_by(|a, b| b.price_usd.value().total_cmp(&a.price_usd.value()));
    sorted.truncate(n);
    sorted
}

/// Tickers ordered by ascending rank, for the card gallery.
pub fn ranked_gallery(records: &[Ticker]) -> Vec<&Ticker> {
    let mut sorted: Vec<&Ticker> = records.iter().collect();
    sorted.sort_by_key(|t| t.rank);
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub label: String,
    pub price_usd: f64,
}

/// Line series of the top-N tickers by price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
    y_ceiling: Option<f64>,
}

impl PriceSeries {
    pub fn top_by_price(records: &[Ticker], n: usize, y_ceiling: Option<f64>) -> Self {
        let points = top_by_price(records, n)
            .into_iter()
            .map(|t| PricePoint {
                label: t.name.clone(),
                price_usd: t.price_usd.value(),
            })
            .collect();
        Self { points, y_ceiling }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[0, max]`: the fixed ceiling when configured, otherwise the highest
    /// price plus 5% headroom.
    pub fn y_bounds(&self) -> [f64; 2] {
        if let Some(ceiling) = self.y_ceiling {
            return [0.0, ceiling];
        }
        let max = self
            .points
            .iter()
            .map(|p| p.price_usd)
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            [0.0, max * 1.05]
        } else {
            [0.0, 1.0]
        }
    }

    /// `(x, y)` pairs with x = position in the series.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price_usd))
            .collect()
    }
}
