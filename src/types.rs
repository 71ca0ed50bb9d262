// =============================================================================
// Shared types used across the sector analyzer
// =============================================================================
//
// The market snapshot is the only input the scoring engine ever sees.  It is
// produced by an external fetcher, handed over as a JSON document, and treated
// as read-only from then on.  Every collection may be partially or fully empty.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

/// Daily bars ordered ascending by date.
pub type PriceSeries = Vec<PriceBar>;

/// Valuation metadata for a sector ETF. Every field is individually optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorInfo {
    #[serde(default)]
    pub forward_pe: Option<f64>,
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

/// Parallel date/value arrays. A `None` value is a gap in the source data
/// (e.g. a FRED "." observation) and is filtered, never interpolated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
}

impl TimeSeries {
    /// Build a gap-free series from plain values, one every 30 days.
    #[cfg(test)]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let values: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        let dates = (0..values.len())
            .map(|i| base + chrono::Duration::days(30 * i as i64))
            .collect();
        Self { dates, values }
    }

    /// Dates and values are parallel arrays of equal length.
    pub fn is_aligned(&self) -> bool {
        self.dates.len() == self.values.len()
    }

    /// Observed, finite values in date order.
    pub fn observations(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| *v)
            .filter(|v| v.is_finite())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_none())
    }
}

/// The aggregated data bundle consumed by the scoring engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Daily bars per sector name.
    #[serde(default)]
    pub sector_prices: HashMap<String, PriceSeries>,
    /// Market index bars used for relative strength.
    #[serde(default)]
    pub benchmark: PriceSeries,
    /// Per-sector ETF metadata (secondary P/E source).
    #[serde(default)]
    pub sector_info: HashMap<String, SectorInfo>,
    /// Primary forward P/E source keyed by sector.
    #[serde(default)]
    pub sector_pe: HashMap<String, f64>,
    /// Named macro series, e.g. `treasury_10y`.
    #[serde(default)]
    pub macro_data: HashMap<String, TimeSeries>,
    /// Monthly employment levels per sector.
    #[serde(default)]
    pub employment_data: HashMap<String, TimeSeries>,
    /// R&D spend as a fraction of revenue per sector.
    #[serde(default)]
    pub rd_data: HashMap<String, f64>,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}
