// =============================================================================
// Signals Module
// =============================================================================
//
// One calculator per signal family.  Each derives a raw per-sector metric from
// the market snapshot, z-score normalizes it with a fixed polarity, and fills
// every sector missing from the result with that signal's stated default:
//
//   signal      raw metric                         polarity   missing
//   momentum    12m return / rel. strength / vol.  higher     50 per component
//   valuation   forward P/E                        lower      50
//   growth      YoY employment growth              higher     50
//   innovation  R&D intensity (> 0 only)           higher     30
//   macro       corr(monthly returns, rate chg.)   lower      50

use serde::{Deserialize, Serialize};

pub mod growth;
pub mod innovation;
pub mod macro_sensitivity;
pub mod momentum;
pub mod normalize;
pub mod valuation;

pub use normalize::{MetricMap, Polarity, ScoreMap, NEUTRAL_SCORE};

/// Component scores at or above this mark are called out as drivers.
pub const DRIVER_THRESHOLD: f64 = 70.0;

/// The five scoring dimensions, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Momentum,
    Valuation,
    Growth,
    Innovation,
    Macro,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Momentum,
        Signal::Valuation,
        Signal::Growth,
        Signal::Innovation,
        Signal::Macro,
    ];

    /// Wire name used in weight configurations and query parameters.
    pub fn name(self) -> &'static str {
        match self {
            Self::Momentum => "momentum",
            Self::Valuation => "valuation",
            Self::Growth => "growth",
            Self::Innovation => "innovation",
            Self::Macro => "macro",
        }
    }

    /// Qualitative label emitted when this component drives the top sector.
    pub fn driver_label(self) -> &'static str {
        match self {
            Self::Momentum => "strong momentum",
            Self::Valuation => "attractive valuation",
            Self::Growth => "employment growth",
            Self::Innovation => "high R&D investment",
            Self::Macro => "favorable macro positioning",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keep only finite raw values; upstream garbage never reaches normalization.
pub(crate) fn finite_only(values: MetricMap) -> MetricMap {
    values.into_iter().filter(|(_, v)| v.is_finite()).collect()
}
