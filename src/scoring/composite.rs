// =============================================================================
// Composite Scorer — weighted opportunity score and ranking
// =============================================================================
//
//   opportunity = Σ weight_i * component_i        (rounded to 2 decimals)
//
// Every configured sector receives a record, even under total data
// unavailability.  Records are stably sorted by opportunity descending, so
// ties keep the configured sector order, then ranked 1..N.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::summary::SummaryReport;
use crate::scoring::weights::ScoringWeights;
use crate::sectors::sector_names;
use crate::signals::normalize::{round2, score_or};
use crate::signals::{
    growth, innovation, macro_sensitivity, momentum, valuation, ScoreMap, Signal, NEUTRAL_SCORE,
};
use crate::types::MarketSnapshot;

/// A sector's complete scoring breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorScore {
    pub sector: String,
    pub opportunity_score: f64,
    pub rank: usize,
    pub momentum_score: f64,
    pub valuation_score: f64,
    pub growth_score: f64,
    pub innovation_score: f64,
    pub macro_score: f64,
    pub price_return_3mo: Option<f64>,
    pub price_return_6mo: Option<f64>,
    pub price_return_12mo: Option<f64>,
    pub relative_strength: Option<f64>,
    pub forward_pe: Option<f64>,
    pub employment_growth: Option<f64>,
    pub rd_intensity: Option<f64>,
}

impl SectorScore {
    pub fn component(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Momentum => self.momentum_score,
            Signal::Valuation => self.valuation_score,
            Signal::Growth => self.growth_score,
            Signal::Innovation => self.innovation_score,
            Signal::Macro => self.macro_score,
        }
    }
}

/// The five normalized score maps, one per signal.
#[derive(Debug, Clone, Default)]
pub struct ComponentScores {
    pub momentum: ScoreMap,
    pub valuation: ScoreMap,
    pub growth: ScoreMap,
    pub innovation: ScoreMap,
    pub macro_: ScoreMap,
}

impl ComponentScores {
    /// Run every signal calculator against the snapshot.
    pub fn calculate(snapshot: &MarketSnapshot) -> Self {
        Self {
            momentum: momentum::momentum_scores(snapshot),
            valuation: valuation::valuation_scores(snapshot),
            growth: growth::growth_scores(snapshot),
            innovation: innovation::innovation_scores(snapshot),
            macro_: macro_sensitivity::macro_scores(snapshot),
        }
    }

    fn map(&self, signal: Signal) -> &ScoreMap {
        match signal {
            Signal::Momentum => &self.momentum,
            Signal::Valuation => &self.valuation,
            Signal::Growth => &self.growth,
            Signal::Innovation => &self.innovation,
            Signal::Macro => &self.macro_,
        }
    }

    /// Component score for a sector, neutral if the calculator omitted it.
    pub fn score(&self, signal: Signal, sector: &str) -> f64 {
        score_or(self.map(signal), sector, NEUTRAL_SCORE)
    }
}

/// Calculates opportunity scores for all sectors.
#[derive(Debug, Clone)]
pub struct SectorScorer {
    weights: ScoringWeights,
}

impl SectorScorer {
    /// Build a scorer from optional weights, falling back to the defaults.
    /// Supplied weights are always re-normalized.
    pub fn new(weights: Option<ScoringWeights>) -> Self {
        Self {
            weights: weights.unwrap_or_default().normalized(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score, rank, and annotate every configured sector.
    pub fn calculate_scores(&self, snapshot: &MarketSnapshot) -> Vec<SectorScore> {
        let components = ComponentScores::calculate(snapshot);

        let returns = momentum::price_returns(snapshot);
        let rel_strength =
            momentum::relative_strengths(snapshot, momentum::SCORED_PERIOD_MONTHS);
        let pe = valuation::forward_pe_map(snapshot);
        let emp_growth = growth::employment_growth(snapshot);

        let mut scores: Vec<SectorScore> = sector_names()
            .map(|sector| {
                let mut record = self.score_sector(sector, &components);
                let period = returns.get(sector).copied().unwrap_or_default();
                record.price_return_3mo = period.three_month;
                record.price_return_6mo = period.six_month;
                record.price_return_12mo = period.twelve_month;
                record.relative_strength = rel_strength.get(sector).copied();
                record.forward_pe = pe.get(sector).copied();
                record.employment_growth = emp_growth.get(sector).copied();
                record.rd_intensity = snapshot
                    .rd_data
                    .get(sector)
                    .copied()
                    .filter(|v| v.is_finite());
                record
            })
            .collect();

        rank(&mut scores);

        debug!(
            sectors = scores.len(),
            top = scores.first().map(|s| s.sector.as_str()).unwrap_or(""),
            "sector scores calculated"
        );

        scores
    }

    /// Composite record for one sector with no display metrics attached.
    pub fn score_sector(&self, sector: &str, components: &ComponentScores) -> SectorScore {
        let opportunity: f64 = Signal::ALL
            .iter()
            .map(|s| self.weights.get(*s) * components.score(*s, sector))
            .sum();

        SectorScore {
            sector: sector.to_string(),
            opportunity_score: round2(opportunity),
            rank: 0,
            momentum_score: components.score(Signal::Momentum, sector),
            valuation_score: components.score(Signal::Valuation, sector),
            growth_score: components.score(Signal::Growth, sector),
            innovation_score: components.score(Signal::Innovation, sector),
            macro_score: components.score(Signal::Macro, sector),
            price_return_3mo: None,
            price_return_6mo: None,
            price_return_12mo: None,
            relative_strength: None,
            forward_pe: None,
            employment_growth: None,
            rd_intensity: None,
        }
    }
}

impl Default for SectorScorer {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Stable sort by opportunity descending, then assign 1-based ranks.
pub fn rank(scores: &mut [SectorScore]) {
    scores.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
    for (i, score) in scores.iter_mut().enumerate() {
        score.rank = i + 1;
    }
}

/// Score a snapshot and summarize it in one call.
pub fn run_analysis(
    snapshot: &MarketSnapshot,
    weights: Option<ScoringWeights>,
) -> (Vec<SectorScore>, SummaryReport) {
    let scorer = SectorScorer::new(weights);
    let scores = scorer.calculate_scores(snapshot);
    let summary = scorer.summary_report(&scores);
    (scores, summary)
}
