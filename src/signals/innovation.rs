// =============================================================================
// Innovation Signal — R&D intensity
// =============================================================================
//
// Only sectors with a positive R&D/revenue ratio enter normalization.  Unknown
// sectors are penalized rather than treated as neutral.

use tracing::debug;

use crate::sectors::sector_names;
use crate::signals::normalize::{fill_missing, uniform, z_score};
use crate::signals::{MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};
use crate::types::MarketSnapshot;

/// Score for sectors with no usable R&D figure.
pub const UNKNOWN_RD_SCORE: f64 = 30.0;

/// Positive, finite R&D intensities keyed by sector.
pub fn rd_intensity(snapshot: &MarketSnapshot) -> MetricMap {
    sector_names()
        .filter_map(|sector| {
            let rd = snapshot.rd_data.get(sector).copied()?;
            (rd.is_finite() && rd > 0.0).then(|| (sector.to_string(), rd))
        })
        .collect()
}

/// Innovation score for every sector.
pub fn innovation_scores(snapshot: &MarketSnapshot) -> ScoreMap {
    let rd = rd_intensity(snapshot);
    if rd.is_empty() {
        debug!("innovation: no R&D data, using neutral defaults");
        return uniform(sector_names(), NEUTRAL_SCORE);
    }

    fill_missing(z_score(&rd, Polarity::HigherIsBetter), sector_names(), UNKNOWN_RD_SCORE)
}
