// =============================================================================
// Growth Signal — year-over-year employment growth
// =============================================================================
//
//   growth = (latest - value 13 observations back) / value 13 back * 100
//
// Monthly observations are used after dropping gaps, so a series needs at
// least 13 observed values.

use tracing::debug;

use crate::sectors::sector_names;
use crate::signals::normalize::{fill_missing, uniform, z_score};
use crate::signals::{finite_only, MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};
use crate::types::MarketSnapshot;

/// Observations spanning one year of monthly data, inclusive of both ends.
pub const YOY_OBSERVATIONS: usize = 13;

/// Year-over-year growth of an observation sequence, in percent.
pub fn year_over_year_growth(observations: &[f64]) -> Option<f64> {
    if observations.len() < YOY_OBSERVATIONS {
        return None;
    }

    let current = observations[observations.len() - 1];
    let year_ago = observations[observations.len() - YOY_OBSERVATIONS];
    if year_ago <= 0.0 {
        return None;
    }

    Some(((current - year_ago) / year_ago) * 100.0)
}

/// Employment growth per sector with enough history.
pub fn employment_growth(snapshot: &MarketSnapshot) -> MetricMap {
    let raw = sector_names()
        .filter_map(|sector| {
            let ts = snapshot.employment_data.get(sector)?;
            let growth = year_over_year_growth(&ts.observations())?;
            Some((sector.to_string(), growth))
        })
        .collect();
    finite_only(raw)
}

/// Growth score for every sector.
pub fn growth_scores(snapshot: &MarketSnapshot) -> ScoreMap {
    let growth = employment_growth(snapshot);
    if growth.is_empty() {
        debug!("growth: no employment history, using neutral defaults");
        return uniform(sector_names(), NEUTRAL_SCORE);
    }

    fill_missing(z_score(&growth, Polarity::HigherIsBetter), sector_names(), NEUTRAL_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeSeries;

    fn monthly(start: f64, step: f64, n: usize) -> TimeSeries {
        TimeSeries::from_values((0..n).map(|i| start + step * i as f64))
    }

    #[test]
    fn yoy_uses_thirteenth_from_tail() {
        let obs: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        // latest = 119, 13 back = index 7 = 107
        let g = year_over_year_growth(&obs).unwrap();
        assert!((g - (12.0 / 107.0 * 100.0)).abs() < 1e-10);
    }

    #[test]
    fn yoy_needs_thirteen_observations() {
        assert!(year_over_year_growth(&[1.0; 12]).is_none());
        assert!(year_over_year_growth(&[1.0; 13]).is_some());
    }

    #[test]
    fn gaps_are_filtered_before_counting() {
        let mut snap = MarketSnapshot::default();
        let mut ts = monthly(100.0, 1.0, 13);
        ts.values[5] = None;
        assert!(ts.is_aligned());
        snap.employment_data.insert("Energy".into(), ts);
        // 13 slots but only 12 observations.
        assert!(employment_growth(&snap).is_empty());
    }

    #[test]
    fn faster_hiring_scores_higher() {
        let mut snap = MarketSnapshot::default();
        snap.employment_data.insert("Health Care".into(), monthly(100.0, 2.0, 24));
        snap.employment_data.insert("Energy".into(), monthly(100.0, -0.5, 24));
        snap.employment_data.insert("Materials".into(), monthly(100.0, 0.5, 5));

        let scores = growth_scores(&snap);
        assert_eq!(scores.len(), 11);
        assert!(scores["Health Care"] > scores["Energy"]);
        assert_eq!(scores["Materials"], 50.0);
    }

    #[test]
    fn no_data_is_neutral() {
        let scores = growth_scores(&MarketSnapshot::default());
        assert!(scores.values().all(|v| *v == 50.0));
        assert_eq!(scores.len(), 11);
    }
}
