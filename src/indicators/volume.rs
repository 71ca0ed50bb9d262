// =============================================================================
// Volume Trend — short vs long simple average volume
// =============================================================================
//
//   trend = (avg(volume, short) - avg(volume, long)) / avg(volume, long) * 100
//
// Both averages are taken over the tail of the series.  A positive trend means
// recent participation is above its longer-run norm.

use crate::types::PriceBar;

/// Simple average volume of the last `period` bars.
pub fn average_volume(series: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let sum: u128 = series[series.len() - period..]
        .iter()
        .map(|b| u128::from(b.volume))
        .sum();
    Some(sum as f64 / period as f64)
}

/// Percentage deviation of the short average volume from the long one.
///
/// Returns `None` when the series is shorter than `long_period` or the long
/// average is zero.
pub fn volume_trend(series: &[PriceBar], short_period: usize, long_period: usize) -> Option<f64> {
    if series.len() < long_period || short_period > long_period {
        return None;
    }

    let long_avg = average_volume(series, long_period)?;
    if long_avg <= 0.0 {
        return None;
    }
    let short_avg = average_volume(series, short_period)?;

    Some(((short_avg - long_avg) / long_avg) * 100.0)
}
