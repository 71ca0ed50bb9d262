// =============================================================================
// Series Indicators Module
// =============================================================================
//
// Pure, side-effect-free series math used by the signal calculators.  Every
// public function returns `Option<T>` (or an empty `Vec`) so callers are
// forced to handle insufficient-data and numerical-edge-case scenarios.

pub mod correlation;
pub mod returns;
pub mod volume;

pub use correlation::{aligned_correlation, monthly_changes, monthly_returns};
pub use returns::{period_return, relative_strength, trading_days};
pub use volume::volume_trend;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, NaiveDate};

    use crate::types::PriceBar;

    fn bar(day: usize, close: f64, volume: u64) -> PriceBar {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        PriceBar {
            date: base + Duration::days(day as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(i, c, 1_000))
            .collect()
    }

    pub fn bars_with_volumes(volumes: &[u64]) -> Vec<PriceBar> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &v)| bar(i, 100.0, v))
            .collect()
    }

    /// Deterministic wavy series: linear drift plus a sinusoid, so returns
    /// vary month to month.
    pub fn drifting_bars(len: usize, drift: f64, amplitude: f64, phase: f64) -> Vec<PriceBar> {
        (0..len)
            .map(|i| {
                let t = i as f64;
                let close = 100.0 + drift * t + amplitude * (t / 7.0 + phase).sin();
                bar(i, close, 1_000 + (i as u64 % 17) * 50)
            })
            .collect()
    }
}
