//! Ticker record as published by the tickers endpoint.
//!
//! The endpoint encodes most numbers as JSON strings (`"price_usd": "67321.12"`)
//! and a few as real numbers (`"volume24": 1.2e10`). Deserialization accepts
//! both so the adapter does not care which one a given field uses today.

use serde::{Deserialize, Deserializer, Serialize};

use super::Amount;
use crate::grid::{Cell, GridRow};

/// One ticker entry. Immutable once fetched.
///
/// Required amounts sent as `""` or `null` are kept blank; optional ones that
/// are missing, blank or `null` are `None`. Neither is filled with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::rank")]
    pub rank: u32,
    pub price_usd: Amount,
    pub percent_change_24h: Amount,
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub percent_change_1h: Option<Amount>,
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub percent_change_7d: Option<Amount>,
    pub price_btc: Amount,
    pub market_cap_usd: Amount,
    #[serde(rename = "volume24", default, deserialize_with = "lenient::optional_amount")]
    pub volume_24h: Option<Amount>,
    #[serde(rename = "csupply", default, deserialize_with = "lenient::optional_amount")]
    pub circulating_supply: Option<Amount>,
    #[serde(rename = "tsupply", default, deserialize_with = "lenient::optional_amount")]
    pub total_supply: Option<Amount>,
    /// Absent for coins without a hard cap.
    #[serde(rename = "msupply", default, deserialize_with = "lenient::optional_amount")]
    pub max_supply: Option<Amount>,
}

/// Columns a ticker can be searched, sorted, and rendered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickerColumn {
    Id,
    Symbol,
    Name,
    Rank,
    PriceUsd,
    PercentChange24h,
    PercentChange1h,
    PercentChange7d,
    PriceBtc,
    MarketCapUsd,
    Volume24h,
    CirculatingSupply,
    TotalSupply,
    MaxSupply,
}

impl TickerColumn {
    /// Every field, in record (and export) order.
    pub const ALL: [TickerColumn; 14] = [
        TickerColumn::Id,
        TickerColumn::Symbol,
        TickerColumn::Name,
        TickerColumn::Rank,
        TickerColumn::PriceUsd,
        TickerColumn::PercentChange24h,
        TickerColumn::PercentChange1h,
        TickerColumn::PercentChange7d,
        TickerColumn::PriceBtc,
        TickerColumn::MarketCapUsd,
        TickerColumn::Volume24h,
        TickerColumn::CirculatingSupply,
        TickerColumn::TotalSupply,
        TickerColumn::MaxSupply,
    ];

    /// Columns shown by the table, left to right.
    pub const TABLE: [TickerColumn; 7] = [
        TickerColumn::Id,
        TickerColumn::Rank,
        TickerColumn::Name,
        TickerColumn::PriceUsd,
        TickerColumn::PercentChange24h,
        TickerColumn::PriceBtc,
        TickerColumn::MarketCapUsd,
    ];

    pub fn header(self) -> &'static str {
        match self {
            TickerColumn::Id => "ID",
            TickerColumn::Symbol => "Symbol",
            TickerColumn::Name => "Name",
            TickerColumn::Rank => "Rank",
            TickerColumn::PriceUsd => "Price USD",
            TickerColumn::PercentChange24h => "% Change (24h)",
            TickerColumn::PercentChange1h => "% Change (1h)",
            TickerColumn::PercentChange7d => "% Change (7d)",
            TickerColumn::PriceBtc => "Price BTC",
            TickerColumn::MarketCapUsd => "Market Cap USD",
            TickerColumn::Volume24h => "Volume (24h)",
            TickerColumn::CirculatingSupply => "Circulating Supply",
            TickerColumn::TotalSupply => "Total Supply",
            TickerColumn::MaxSupply => "Max Supply",
        }
    }

    /// Snake-case key, matching the endpoint's field names.
    pub fn key(self) -> &'static str {
        match self {
            TickerColumn::Id => "id",
            TickerColumn::Symbol => "symbol",
            TickerColumn::Name => "name",
            TickerColumn::Rank => "rank",
            TickerColumn::PriceUsd => "price_usd",
            TickerColumn::PercentChange24h => "percent_change_24h",
            TickerColumn::PercentChange1h => "percent_change_1h",
            TickerColumn::PercentChange7d => "percent_change_7d",
            TickerColumn::PriceBtc => "price_btc",
            TickerColumn::MarketCapUsd => "market_cap_usd",
            TickerColumn::Volume24h => "volume24",
            TickerColumn::CirculatingSupply => "csupply",
            TickerColumn::TotalSupply => "tsupply",
            TickerColumn::MaxSupply => "msupply",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl GridRow for Ticker {
    type Column = TickerColumn;

    fn row_id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<Cell<'_>> {
        TickerColumn::ALL.iter().map(|&c| self.cell(c)).collect()
    }

    fn cell(&self, column: TickerColumn) -> Cell<'_> {
        match column {
            TickerColumn::Id => Cell::Text(&self.id),
            TickerColumn::Symbol => Cell::Text(&self.symbol),
            TickerColumn::Name => Cell::Text(&self.name),
            TickerColumn::Rank => Cell::Integer(u64::from(self.rank)),
            TickerColumn::PriceUsd => amount_cell(Some(&self.price_usd)),
            TickerColumn::PercentChange24h => amount_cell(Some(&self.percent_change_24h)),
            TickerColumn::PercentChange1h => amount_cell(self.percent_change_1h.as_ref()),
            TickerColumn::PercentChange7d => amount_cell(self.percent_change_7d.as_ref()),
            TickerColumn::PriceBtc => amount_cell(Some(&self.price_btc)),
            TickerColumn::MarketCapUsd => amount_cell(Some(&self.market_cap_usd)),
            TickerColumn::Volume24h => amount_cell(self.volume_24h.as_ref()),
            TickerColumn::CirculatingSupply => amount_cell(self.circulating_supply.as_ref()),
            TickerColumn::TotalSupply => amount_cell(self.total_supply.as_ref()),
            TickerColumn::MaxSupply => amount_cell(self.max_supply.as_ref()),
        }
    }
}

fn amount_cell(amount: Option<&Amount>) -> Cell<'_> {
    match amount {
        Some(a) if !a.is_blank() => Cell::Decimal {
            value: a.value(),
            text: a.as_str(),
        },
        _ => Cell::Empty,
    }
}

mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
            Raw::Null => Err(serde::de::Error::custom("missing number")),
        }
    }

    /// Missing (via `#[serde(default)]`), `null` and `""` all become `None`.
    pub fn optional_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Amount>, D::Error> {
        Ok(Option::<Amount>::deserialize(d)?.filter(|a| !a.is_blank()))
    }

    pub fn rank<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let n = number(d)?;
        if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
            return Err(serde::de::Error::custom(format!("invalid rank: {n}")));
        }
        Ok(n as u32)
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(n) => Ok(n.to_string()),
            Raw::Text(s) => Ok(s),
            Raw::Null => Err(serde::de::Error::custom("missing identifier")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITCOIN: &str = r#"{
        "id": "90", "symbol": "BTC", "name": "Bitcoin", "nameid": "bitcoin",
        "rank": 1, "price_usd": "67321.12", "percent_change_24h": "-1.25",
        "percent_change_1h": "0.10", "percent_change_7d": "4.80",
        "price_btc": "1.00", "market_cap_usd": "1326740298115.50",
        "volume24": 28736491234.12, "volume24a": 30111234567.3,
        "csupply": "19707712.00", "tsupply": "19707712", "msupply": "21000000"
    }"#;

    #[test]
    fn parses_string_encoded_numbers() {
        let t: Ticker = serde_json::from_str(BITCOIN).unwrap();
        assert_eq!(t.id, "90");
        assert_eq!(t.rank, 1);
        assert_eq!(t.price_usd.value(), 67321.12);
        assert_eq!(t.percent_change_24h.value(), -1.25);
        assert_eq!(t.volume_24h.as_ref().map(Amount::value), Some(28736491234.12));
        assert_eq!(t.max_supply.as_ref().map(Amount::value), Some(21_000_000.0));
    }

    #[test]
    fn cells_render_numbers_as_received() {
        let json = BITCOIN.replace("67321.12", "67321.10");
        let t: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(t.cell(TickerColumn::PriceUsd).render(), "67321.10");
        assert_eq!(t.cell(TickerColumn::PriceBtc).render(), "1.00");
        assert_eq!(t.cell(TickerColumn::CirculatingSupply).render(), "19707712.00");
        assert_eq!(t.cell(TickerColumn::PercentChange7d).render(), "4.80");
    }

    #[test]
    fn missing_optional_fields_stay_empty() {
        let json = BITCOIN
            .replace(r#""percent_change_1h": "0.10","#, "")
            .replace(r#""volume24": 28736491234.12,"#, "");
        let t: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(t.percent_change_1h, None);
        assert_eq!(t.volume_24h, None);
        assert_eq!(t.cell(TickerColumn::PercentChange1h), Cell::Empty);
        assert_eq!(t.cell(TickerColumn::Volume24h).render(), "");
    }

    #[test]
    fn blank_required_amount_renders_empty() {
        let json = BITCOIN.replace(r#""price_btc": "1.00""#, r#""price_btc": """#);
        let t: Ticker = serde_json::from_str(&json).unwrap();
        assert!(t.price_btc.is_blank());
        assert_eq!(t.cell(TickerColumn::PriceBtc), Cell::Empty);
    }

    #[test]
    fn empty_max_supply_is_none() {
        let json = BITCOIN.replace(r#""msupply": "21000000""#, r#""msupply": """#);
        let t: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(t.max_supply, None);
        assert_eq!(t.cell(TickerColumn::MaxSupply), Cell::Empty);
    }

    #[test]
    fn numeric_id_is_accepted() {
        let json = BITCOIN.replace(r#""id": "90""#, r#""id": 90"#);
        let t: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(t.id, "90");
    }

    #[test]
    fn zero_rank_is_rejected() {
        let json = BITCOIN.replace(r#""rank": 1"#, r#""rank": 0"#);
        assert!(serde_json::from_str::<Ticker>(&json).is_err());
    }

    #[test]
    fn cells_follow_record_order() {
        let t: Ticker = serde_json::from_str(BITCOIN).unwrap();
        let rendered: Vec<String> = t.cells().iter().map(Cell::render).collect();
        assert_eq!(rendered.len(), TickerColumn::ALL.len());
        assert_eq!(&rendered[..5], ["90", "BTC", "Bitcoin", "1", "67321.12"]);
        assert_eq!(rendered[13], "21000000");
    }

    #[test]
    fn column_keys_roundtrip() {
        for c in TickerColumn::ALL {
            assert_eq!(TickerColumn::from_key(c.key()), Some(c));
        }
        assert_eq!(TickerColumn::from_key("nameid"), None);
    }
}
