// =============================================================================
// Scoring Weights — per-signal weights for the composite score
// =============================================================================
//
// Weights are non-negative and are re-normalized to sum to 1.0 whenever the
// supplied sum deviates from 1.0 by more than `SUM_TOLERANCE`.  All fields
// carry `#[serde(default = ...)]` so partial JSON fills from the defaults.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::signals::Signal;

/// Allowed deviation of the weight sum from 1.0 before rescaling.
pub const SUM_TOLERANCE: f64 = 0.01;

fn default_momentum() -> f64 {
    0.25
}

fn default_valuation() -> f64 {
    0.20
}

fn default_growth() -> f64 {
    0.20
}

fn default_innovation() -> f64 {
    0.20
}

fn default_macro() -> f64 {
    0.15
}

/// Weight configuration for the five signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_momentum")]
    pub momentum: f64,
    #[serde(default = "default_valuation")]
    pub valuation: f64,
    #[serde(default = "default_growth")]
    pub growth: f64,
    #[serde(default = "default_innovation")]
    pub innovation: f64,
    #[serde(default = "default_macro", rename = "macro")]
    pub macro_: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            momentum: default_momentum(),
            valuation: default_valuation(),
            growth: default_growth(),
            innovation: default_innovation(),
            macro_: default_macro(),
        }
    }
}

impl ScoringWeights {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Momentum => self.momentum,
            Signal::Valuation => self.valuation,
            Signal::Growth => self.growth,
            Signal::Innovation => self.innovation,
            Signal::Macro => self.macro_,
        }
    }

    pub fn set(&mut self, signal: Signal, weight: f64) {
        let slot = match signal {
            Signal::Momentum => &mut self.momentum,
            Signal::Valuation => &mut self.valuation,
            Signal::Growth => &mut self.growth,
            Signal::Innovation => &mut self.innovation,
            Signal::Macro => &mut self.macro_,
        };
        *slot = weight;
    }

    pub fn sum(&self) -> f64 {
        Signal::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Apply partial overrides on top of `self`.  Returns `None` when nothing
    /// was overridden so callers can keep `self` as is.
    pub fn with_overrides<I>(self, overrides: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Signal, f64)>,
    {
        let mut weights = self;
        let mut any = false;
        for (signal, w) in overrides {
            weights.set(signal, w);
            any = true;
        }
        any.then_some(weights)
    }

    /// Sanitize and rescale so the weights sum to 1.0 within tolerance.
    ///
    /// Negative or non-finite weights count as zero.  A configuration whose
    /// sum is zero carries no information and falls back to the defaults.
    pub fn normalized(mut self) -> Self {
        for signal in Signal::ALL {
            let w = self.get(signal);
            if !w.is_finite() || w < 0.0 {
                warn!(signal = %signal, weight = w, "invalid weight treated as zero");
                self.set(signal, 0.0);
            }
        }

        let sum = self.sum();
        if sum <= 0.0 {
            warn!("weights sum to zero, falling back to defaults");
            return Self::default();
        }

        if (sum - 1.0).abs() > SUM_TOLERANCE {
            debug!(sum, "rescaling weights to sum to 1.0");
            for signal in Signal::ALL {
                self.set(signal, self.get(signal) / sum);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert_eq!(w.normalized(), w);
    }

    #[test]
    fn equal_weights_rescale_to_a_fifth() {
        let w = ScoringWeights::default()
            .with_overrides(Signal::ALL.map(|s| (s, 2.0)))
            .unwrap()
            .normalized();
        for s in Signal::ALL {
            assert!((w.get(s) - 0.2).abs() < 1e-12, "{s} = {}", w.get(s));
        }
    }

    #[test]
    fn small_deviation_is_left_alone() {
        let w = ScoringWeights {
            momentum: 0.255,
            ..Default::default()
        };
        let n = w.normalized();
        assert_eq!(n.momentum, 0.255);
    }

    #[test]
    fn zero_and_invalid_weights_fall_back() {
        let zero = ScoringWeights {
            momentum: 0.0,
            valuation: 0.0,
            growth: 0.0,
            innovation: 0.0,
            macro_: 0.0,
        };
        assert_eq!(zero.normalized(), ScoringWeights::default());

        let mut bad = ScoringWeights::default();
        bad.set(Signal::Growth, -3.0);
        bad.set(Signal::Macro, f64::NAN);
        let n = bad.normalized();
        assert_eq!(n.growth, 0.0);
        assert_eq!(n.macro_, 0.0);
        assert!((n.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn overrides_fill_from_base() {
        assert!(ScoringWeights::default().with_overrides(Vec::new()).is_none());

        let w = ScoringWeights::default()
            .with_overrides([(Signal::Macro, 0.5)])
            .unwrap();
        assert_eq!(w.macro_, 0.5);
        assert_eq!(w.momentum, 0.25);

        let base = ScoringWeights {
            momentum: 0.1,
            valuation: 0.1,
            growth: 0.1,
            innovation: 0.1,
            macro_: 0.6,
        };
        let w = base.with_overrides([(Signal::Momentum, 0.3)]).unwrap();
        assert_eq!(w.momentum, 0.3);
        assert_eq!(w.macro_, 0.6);
        assert_eq!(w.growth, 0.1);
    }

    #[test]
    fn serde_uses_signal_names() {
        let json = serde_json::to_value(ScoringWeights::default()).unwrap();
        assert_eq!(json["macro"], 0.15);

        let w: ScoringWeights = serde_json::from_str(r#"{ "growth": 0.6 }"#).unwrap();
        assert_eq!(w.growth, 0.6);
        assert_eq!(w.valuation, 0.20);
    }
}
