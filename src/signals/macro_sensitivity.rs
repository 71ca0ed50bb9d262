// =============================================================================
// Macro Signal — interest-rate sensitivity
// =============================================================================
//
// For each sector, correlate monthly price returns (21-bar strides) with the
// month-over-month changes of the 10-year Treasury yield over their longest
// common recent window.  Low correlation means the sector is resilient to rate
// moves, so lower raw values score higher.
//
// With no reference rate series at all, every sector gets the neutral default.

use tracing::debug;

use crate::indicators::{aligned_correlation, monthly_changes, monthly_returns};
use crate::sectors::{sector_names, TREASURY_10Y};
use crate::signals::normalize::{fill_missing, uniform, z_score};
use crate::signals::{MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};
use crate::types::{MarketSnapshot, TimeSeries};

/// Minimum aligned monthly points for a correlation to count.
pub const MIN_ALIGNED_MONTHS: usize = 12;

/// Correlation of each sector's monthly returns with rate changes.
pub fn rate_sensitivity(snapshot: &MarketSnapshot, rates: &TimeSeries) -> MetricMap {
    let rate_changes = monthly_changes(&rates.observations());
    if rate_changes.len() < MIN_ALIGNED_MONTHS {
        return MetricMap::new();
    }

    sector_names()
        .filter_map(|sector| {
            let series = snapshot.sector_prices.get(sector)?;
            let returns = monthly_returns(series);
            let corr = aligned_correlation(&returns, &rate_changes, MIN_ALIGNED_MONTHS)?;
            Some((sector.to_string(), corr))
        })
        .collect()
}

/// Macro score for every sector.
pub fn macro_scores(snapshot: &MarketSnapshot) -> ScoreMap {
    let Some(rates) = snapshot
        .macro_data
        .get(TREASURY_10Y)
        .filter(|ts| !ts.is_empty())
    else {
        debug!(series = TREASURY_10Y, "macro: reference rate missing, using neutral defaults");
        return uniform(sector_names(), NEUTRAL_SCORE);
    };

    let sensitivity = rate_sensitivity(snapshot, rates);
    if sensitivity.is_empty() {
        debug!("macro: no sector met the aligned-history minimum");
        return uniform(sector_names(), NEUTRAL_SCORE);
    }

    fill_missing(
        z_score(&sensitivity, Polarity::LowerIsBetter),
        sector_names(),
        NEUTRAL_SCORE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::drifting_bars;

    fn rate_series(n: usize) -> TimeSeries {
        TimeSeries::from_values((0..n).map(|i| 3.0 + 0.4 * ((i as f64) / 2.0).sin()))
    }

    #[test]
    fn missing_reference_series_is_neutral() {
        let mut snap = MarketSnapshot::default();
        snap.sector_prices.insert("Energy".into(), drifting_bars(400, 0.1, 2.0, 0.0));
        snap.macro_data.insert("cpi".into(), rate_series(30));

        let scores = macro_scores(&snap);
        assert_eq!(scores.len(), 11);
        assert!(scores.values().all(|v| *v == 50.0));
    }

    #[test]
    fn short_rate_history_is_neutral() {
        let mut snap = MarketSnapshot::default();
        snap.sector_prices.insert("Energy".into(), drifting_bars(400, 0.1, 2.0, 0.0));
        snap.macro_data.insert(TREASURY_10Y.into(), rate_series(12));

        // 12 levels give only 11 changes.
        assert!(macro_scores(&snap).values().all(|v| *v == 50.0));
    }

    #[test]
    fn short_price_history_is_skipped() {
        let mut snap = MarketSnapshot::default();
        // 252 bars => 11 strides, one short of the minimum.
        snap.sector_prices.insert("Energy".into(), drifting_bars(252, 0.1, 2.0, 0.0));
        snap.sector_prices.insert("Utilities".into(), drifting_bars(253, 0.1, 2.0, 1.0));
        let rates = rate_series(40);

        let sens = rate_sensitivity(&snap, &rates);
        assert!(!sens.contains_key("Energy"));
        assert!(sens.contains_key("Utilities"));
    }

    #[test]
    fn scores_cover_universe_and_are_bounded() {
        let mut snap = MarketSnapshot::default();
        for (i, sector) in ["Energy", "Utilities", "Financials", "Real Estate"]
            .iter()
            .enumerate()
        {
            snap.sector_prices
                .insert(sector.to_string(), drifting_bars(400, 0.05, 3.0, i as f64 * 1.3));
        }
        snap.macro_data.insert(TREASURY_10Y.into(), rate_series(60));

        let sens = rate_sensitivity(&snap, &snap.macro_data[TREASURY_10Y]);
        assert_eq!(sens.len(), 4);
        assert!(sens.values().all(|c| (-1.0..=1.0).contains(c)));

        let scores = macro_scores(&snap);
        assert_eq!(scores.len(), 11);
        assert!(scores.values().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(scores["Materials"], 50.0);
    }
}
