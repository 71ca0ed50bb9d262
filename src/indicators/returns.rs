// =============================================================================
// Period Returns & Relative Strength
// =============================================================================
//
// A period of P months is approximated as P * 21 trading days.  The start bar
// is indexed from the tail of the series:
//   return = (close[len-1] - close[len-days]) / close[len-days] * 100
//
// Relative strength is the sector's return minus the benchmark's return over
// the same window.  Both series must cover the window.

use crate::types::PriceBar;

/// Trading days per calendar month.
pub const TRADING_DAYS_PER_MONTH: usize = 21;

/// Number of trading days covering `months` calendar months.
pub fn trading_days(months: usize) -> usize {
    months * TRADING_DAYS_PER_MONTH
}

/// Percentage return over the last `days` bars.
///
/// Returns `None` when the series is shorter than `days`, `days` is zero, or
/// the start close is not a positive finite number.
pub fn period_return(series: &[PriceBar], days: usize) -> Option<f64> {
    if days == 0 || series.len() < days {
        return None;
    }

    let start = series[series.len() - days].close;
    let end = series[series.len() - 1].close;
    if start <= 0.0 || !start.is_finite() {
        return None;
    }

    let ret = ((end - start) / start) * 100.0;
    ret.is_finite().then_some(ret)
}

/// Sector return minus benchmark return over the last `days` bars.
pub fn relative_strength(series: &[PriceBar], benchmark: &[PriceBar], days: usize) -> Option<f64> {
    let benchmark_return = period_return(benchmark, days)?;
    let sector_return = period_return(series, days)?;
    Some(sector_return - benchmark_return)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::bars_from_closes;

    #[test]
    fn return_over_full_window() {
        let bars = bars_from_closes(&[100.0, 105.0, 110.0, 120.0]);
        let r = period_return(&bars, 4).unwrap();
        assert!((r - 20.0).abs() < 1e-10);
    }

    #[test]
    fn return_indexes_from_tail() {
        let bars = bars_from_closes(&[50.0, 100.0, 90.0, 110.0]);
        // Start bar is len - 2 = index 2 (90.0).
        let r = period_return(&bars, 2).unwrap();
        assert!((r - (20.0 / 90.0 * 100.0)).abs() < 1e-10);
    }

    #[test]
    fn return_insufficient_data() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
        assert!(period_return(&bars, 4).is_none());
        assert!(period_return(&bars, 0).is_none());
    }

    #[test]
    fn return_zero_start_is_skipped() {
        let bars = bars_from_closes(&[0.0, 2.0]);
        assert!(period_return(&bars, 2).is_none());
    }

    #[test]
    fn trading_days_approximation() {
        assert_eq!(trading_days(3), 63);
        assert_eq!(trading_days(12), 252);
    }

    #[test]
    fn relative_strength_subtracts_benchmark() {
        let sector = bars_from_closes(&[100.0, 130.0]);
        let bench = bars_from_closes(&[100.0, 110.0]);
        let rs = relative_strength(&sector, &bench, 2).unwrap();
        assert!((rs - 20.0).abs() < 1e-10);
    }

    #[test]
    fn relative_strength_requires_both_windows() {
        let sector = bars_from_closes(&[100.0, 130.0, 140.0]);
        let bench = bars_from_closes(&[100.0, 110.0]);
        assert!(relative_strength(&sector, &bench, 3).is_none());
        assert!(relative_strength(&bench, &sector, 3).is_none());
    }
}
