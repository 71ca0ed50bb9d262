// =============================================================================
// Rate Sensitivity Building Blocks
// =============================================================================
//
// Monthly returns are sampled from daily bars on fixed 21-bar strides:
//   r_k = (close[21k] - close[21(k-1)]) / close[21(k-1)]     k = 1, 2, ...
//
// Rate changes are simple month-over-month fractional changes; a step whose
// prior value is exactly zero is skipped.
//
// Pearson correlation is computed over the most recent common-length suffix
// of the two series.

use crate::indicators::returns::TRADING_DAYS_PER_MONTH;
use crate::types::PriceBar;

/// Fractional returns over consecutive 21-bar strides, oldest first.
pub fn monthly_returns(series: &[PriceBar]) -> Vec<f64> {
    if series.len() <= TRADING_DAYS_PER_MONTH {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(series.len() / TRADING_DAYS_PER_MONTH);
    let mut i = TRADING_DAYS_PER_MONTH;
    while i < series.len() {
        let prev = series[i - TRADING_DAYS_PER_MONTH].close;
        let curr = series[i].close;
        if prev > 0.0 {
            let r = (curr - prev) / prev;
            if r.is_finite() {
                result.push(r);
            }
        }
        i += TRADING_DAYS_PER_MONTH;
    }
    result
}

/// Month-over-month fractional changes of an observation sequence.
pub fn monthly_changes(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .filter(|c| c.is_finite())
        .collect()
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` for mismatched or too-short inputs and when either series
/// has zero variance (the coefficient is undefined).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }

    let r = covariance / denominator;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Correlate the most recent `min(len)` points of both series, requiring at
/// least `min_points` aligned observations.
pub fn aligned_correlation(a: &[f64], b: &[f64], min_points: usize) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < min_points {
        return None;
    }
    pearson_correlation(&a[a.len() - n..], &b[b.len() - n..])
}
