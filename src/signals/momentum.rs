// =============================================================================
// Momentum Signal — price returns, relative strength, volume trend
// =============================================================================
//
// Three sub-metrics are z-score normalized independently, then blended:
//
//   momentum = 0.50 * score(12m return)
//            + 0.35 * score(12m relative strength vs benchmark)
//            + 0.15 * score(20d vs 50d average volume trend)
//
// A sector missing from a sub-metric contributes the neutral 50 for that
// component, so every sector always receives a momentum score.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::indicators::{period_return, relative_strength, trading_days, volume_trend};
use crate::sectors::sector_names;
use crate::signals::normalize::{round2, score_or, z_score};
use crate::signals::{finite_only, MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};
use crate::types::MarketSnapshot;

/// Look-back periods in months for the display return table.
pub const MOMENTUM_PERIODS: [usize; 3] = [3, 6, 12];

/// Look-back used for the scored return and relative strength.
pub const SCORED_PERIOD_MONTHS: usize = 12;

pub const VOLUME_SHORT_WINDOW: usize = 20;
pub const VOLUME_LONG_WINDOW: usize = 50;

/// Sectors with fewer bars than this get no return table at all.
const MIN_BARS_FOR_RETURNS: usize = 20;

const RETURN_WEIGHT: f64 = 0.50;
const RELATIVE_STRENGTH_WEIGHT: f64 = 0.35;
const VOLUME_WEIGHT: f64 = 0.15;

/// Percentage returns over the standard momentum periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodReturns {
    pub three_month: Option<f64>,
    pub six_month: Option<f64>,
    pub twelve_month: Option<f64>,
}

impl PeriodReturns {
    fn set(&mut self, months: usize, value: f64) {
        match months {
            3 => self.three_month = Some(value),
            6 => self.six_month = Some(value),
            12 => self.twelve_month = Some(value),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        self.three_month.is_none() && self.six_month.is_none() && self.twelve_month.is_none()
    }
}

/// Per-sector return table; sectors with no computable period are omitted.
pub fn price_returns(snapshot: &MarketSnapshot) -> HashMap<String, PeriodReturns> {
    let mut table = HashMap::new();

    for sector in sector_names() {
        let Some(series) = snapshot.sector_prices.get(sector) else {
            continue;
        };
        if series.len() < MIN_BARS_FOR_RETURNS {
            continue;
        }

        let mut returns = PeriodReturns::default();
        for months in MOMENTUM_PERIODS {
            if let Some(r) = period_return(series, trading_days(months)) {
                returns.set(months, r);
            }
        }

        if !returns.is_empty() {
            table.insert(sector.to_string(), returns);
        }
    }

    table
}

/// Sector return minus benchmark return over `months`.
pub fn relative_strengths(snapshot: &MarketSnapshot, months: usize) -> MetricMap {
    let days = trading_days(months);
    if snapshot.benchmark.len() < days {
        return MetricMap::new();
    }

    let raw = sector_names()
        .filter_map(|sector| {
            let series = snapshot.sector_prices.get(sector)?;
            let rs = relative_strength(series, &snapshot.benchmark, days)?;
            Some((sector.to_string(), rs))
        })
        .collect();
    finite_only(raw)
}

/// Short-vs-long average volume deviation in percent.
pub fn volume_trends(snapshot: &MarketSnapshot, short: usize, long: usize) -> MetricMap {
    let raw = sector_names()
        .filter_map(|sector| {
            let series = snapshot.sector_prices.get(sector)?;
            Some((sector.to_string(), volume_trend(series, short, long)?))
        })
        .collect();
    finite_only(raw)
}

/// Blended momentum score for every sector.
pub fn momentum_scores(snapshot: &MarketSnapshot) -> ScoreMap {
    let returns_12m: MetricMap = price_returns(snapshot)
        .into_iter()
        .filter_map(|(sector, r)| r.twelve_month.map(|v| (sector, v)))
        .collect();
    let rel_strength = relative_strengths(snapshot, SCORED_PERIOD_MONTHS);
    let volume = volume_trends(snapshot, VOLUME_SHORT_WINDOW, VOLUME_LONG_WINDOW);

    debug!(
        returns = returns_12m.len(),
        relative_strength = rel_strength.len(),
        volume = volume.len(),
        "momentum inputs"
    );

    let norm_returns = z_score(&finite_only(returns_12m), Polarity::HigherIsBetter);
    let norm_rs = z_score(&rel_strength, Polarity::HigherIsBetter);
    let norm_volume = z_score(&volume, Polarity::HigherIsBetter);

    sector_names()
        .map(|sector| {
            let blended = RETURN_WEIGHT * score_or(&norm_returns, sector, NEUTRAL_SCORE)
                + RELATIVE_STRENGTH_WEIGHT * score_or(&norm_rs, sector, NEUTRAL_SCORE)
                + VOLUME_WEIGHT * score_or(&norm_volume, sector, NEUTRAL_SCORE);
            (sector.to_string(), round2(blended))
        })
        .collect()
}
