// =============================================================================
// Valuation Signal — forward P/E, lower is better
// =============================================================================

use tracing::debug;

use crate::sectors::sector_names;
use crate::signals::normalize::{fill_missing, uniform, z_score};
use crate::signals::{MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};
use crate::types::MarketSnapshot;

fn usable(pe: f64) -> bool {
    pe.is_finite() && pe > 0.0
}

/// Effective forward P/E per sector.
///
/// The primary source wins; the ETF metadata's forward P/E is used only where
/// the primary has no usable value.  Non-positive values are never used.
pub fn forward_pe_map(snapshot: &MarketSnapshot) -> MetricMap {
    sector_names()
        .filter_map(|sector| {
            let primary = snapshot.sector_pe.get(sector).copied().filter(|pe| usable(*pe));
            let secondary = || {
                snapshot
                    .sector_info
                    .get(sector)
                    .and_then(|info| info.forward_pe)
                    .filter(|pe| usable(*pe))
            };
            primary
                .or_else(secondary)
                .map(|pe| (sector.to_string(), pe))
        })
        .collect()
}

/// Valuation score for every sector; cheaper sectors score higher.
pub fn valuation_scores(snapshot: &MarketSnapshot) -> ScoreMap {
    let pe = forward_pe_map(snapshot);
    if pe.is_empty() {
        debug!("valuation: no P/E data, using neutral defaults");
        return uniform(sector_names(), NEUTRAL_SCORE);
    }

    fill_missing(z_score(&pe, Polarity::LowerIsBetter), sector_names(), NEUTRAL_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SectorInfo;

    fn info(pe: Option<f64>) -> SectorInfo {
        SectorInfo {
            forward_pe: pe,
            ..Default::default()
        }
    }

    #[test]
    fn primary_source_takes_precedence() {
        let mut snap = MarketSnapshot::default();
        snap.sector_pe.insert("Energy".into(), 11.0);
        snap.sector_info.insert("Energy".into(), info(Some(30.0)));
        snap.sector_info.insert("Utilities".into(), info(Some(18.0)));

        let pe = forward_pe_map(&snap);
        assert_eq!(pe["Energy"], 11.0);
        assert_eq!(pe["Utilities"], 18.0);
    }

    #[test]
    fn non_positive_values_fall_through() {
        let mut snap = MarketSnapshot::default();
        snap.sector_pe.insert("Energy".into(), -4.0);
        snap.sector_info.insert("Energy".into(), info(Some(14.0)));
        snap.sector_info.insert("Materials".into(), info(Some(0.0)));
        snap.sector_info.insert("Financials".into(), info(None));

        let pe = forward_pe_map(&snap);
        assert_eq!(pe["Energy"], 14.0);
        assert!(!pe.contains_key("Materials"));
        assert!(!pe.contains_key("Financials"));
    }

    #[test]
    fn cheaper_sector_scores_higher() {
        let mut snap = MarketSnapshot::default();
        snap.sector_pe.insert("Energy".into(), 10.0);
        snap.sector_pe.insert("Information Technology".into(), 30.0);

        let scores = valuation_scores(&snap);
        assert_eq!(scores.len(), 11);
        assert!(scores["Energy"] > scores["Information Technology"]);
        assert_eq!(scores["Health Care"], 50.0);
    }

    #[test]
    fn no_data_is_neutral() {
        let scores = valuation_scores(&MarketSnapshot::default());
        assert_eq!(scores.len(), 11);
        assert!(scores.values().all(|v| *v == 50.0));
    }
}
