// =============================================================================
// Score Normalization — raw metric maps to 0-100 scores
// =============================================================================
//
// Min-max:
//   score = (value - min) / (max - min) * 100
//
// Z-score (default for every signal calculator):
//   z     = (value - mean) / std          (population std)
//   score = clamp(50 + 15 z, 0, 100)
//
// With lower-is-better polarity the score is inverted (100 - score).  Results
// are rounded to 2 decimals.  A map without spread maps every entity to the
// neutral 50.0 and an empty map normalizes to an empty map.
//
// Inputs are expected to be finite; calculators filter garbage before calling.
// Finite inputs of any magnitude stay finite: min-max works on halved values
// and z-score on values scaled by the largest magnitude, neither of which
// changes the resulting score.

use std::collections::HashMap;

/// Entity name to raw metric value.
pub type MetricMap = HashMap<String, f64>;

/// Entity name to normalized 0-100 score.
pub type ScoreMap = HashMap<String, f64>;

/// Score assigned when there is no information to distinguish entities.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Points of score per standard deviation in z-score normalization.
const Z_SCALE: f64 = 15.0;

/// Whether higher raw values are favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    fn orient(self, score: f64) -> f64 {
        match self {
            Self::HigherIsBetter => score,
            Self::LowerIsBetter => 100.0 - score,
        }
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn neutral(values: &MetricMap) -> ScoreMap {
    values.keys().map(|k| (k.clone(), NEUTRAL_SCORE)).collect()
}

fn bounds(values: &MetricMap) -> (f64, f64) {
    values
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Min-max normalize to 0-100.
// Signal calculators all use `z_score`; min-max is kept as the alternative.
#[cfg_attr(not(test), allow(dead_code))]
pub fn min_max(values: &MetricMap, polarity: Polarity) -> ScoreMap {
    if values.is_empty() {
        return ScoreMap::new();
    }

    let (min, max) = bounds(values);
    let half_min = min / 2.0;
    let range = max / 2.0 - half_min;
    if max == min || !(range.is_finite() && range > 0.0) {
        return neutral(values);
    }

    values
        .iter()
        .map(|(k, &v)| {
            let score = ((v / 2.0 - half_min) / range) * 100.0;
            (k.clone(), round2(polarity.orient(score)))
        })
        .collect()
}

/// Z-score normalize to 0-100 around a neutral midpoint of 50.
pub fn z_score(values: &MetricMap, polarity: Polarity) -> ScoreMap {
    if values.is_empty() {
        return ScoreMap::new();
    }

    let (min, max) = bounds(values);
    let scale = min.abs().max(max.abs());
    if max == min || !(scale.is_finite() && scale > 0.0) {
        return neutral(values);
    }

    let n = values.len() as f64;
    let mean = values.values().map(|v| v / scale).sum::<f64>() / n;
    let variance = values
        .values()
        .map(|v| (v / scale - mean).powi(2))
        .sum::<f64>()
        / n;
    let std = variance.sqrt();

    if !(std.is_finite() && std > 0.0) {
        return neutral(values);
    }

    values
        .iter()
        .map(|(k, &v)| {
            let z = (v / scale - mean) / std;
            let score = (NEUTRAL_SCORE + z * Z_SCALE).clamp(0.0, 100.0);
            (k.clone(), round2(polarity.orient(score)))
        })
        .collect()
}

/// Explicit lookup-with-default over a partial score map.
pub fn score_or(scores: &ScoreMap, entity: &str, default: f64) -> f64 {
    scores.get(entity).copied().unwrap_or(default)
}

/// Give every entity in `universe` a score, using `default` where absent.
pub fn fill_missing<'a>(
    mut scores: ScoreMap,
    universe: impl IntoIterator<Item = &'a str>,
    default: f64,
) -> ScoreMap {
    for entity in universe {
        scores.entry(entity.to_string()).or_insert(default);
    }
    scores
}

/// A score map holding `default` for every entity in `universe`.
pub fn uniform<'a>(universe: impl IntoIterator<Item = &'a str>, default: f64) -> ScoreMap {
    fill_missing(ScoreMap::new(), universe, default)
}
