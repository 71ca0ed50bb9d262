// =============================================================================
// Summary Report — leaders, laggards, distribution and drivers
// =============================================================================
//
// Built from an already ranked score list.  Drivers are taken from the
// top-ranked sector only: one label per component scoring at or above
// `DRIVER_THRESHOLD`, in signal declaration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::composite::{SectorScore, SectorScorer};
use crate::scoring::weights::ScoringWeights;
use crate::signals::normalize::round2;
use crate::signals::{Signal, DRIVER_THRESHOLD};

/// Number of leaders and laggards reported.
const HEADLINE_COUNT: usize = 3;

/// Basic ranking info for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRank {
    pub rank: usize,
    pub sector: String,
    pub score: f64,
}

impl From<&SectorScore> for SectorRank {
    fn from(s: &SectorScore) -> Self {
        Self {
            rank: s.rank,
            sector: s.sector.clone(),
            score: s.opportunity_score,
        }
    }
}

/// Opportunity score statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub spread: f64,
}

impl ScoreDistribution {
    pub fn from_scores(scores: &[SectorScore]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let values = scores.iter().map(|s| s.opportunity_score);
        let sum: f64 = values.clone().sum();
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let min = values.fold(f64::INFINITY, f64::min);

        Self {
            average: round2(sum / scores.len() as f64),
            max: round2(max),
            min: round2(min),
            spread: round2(max - min),
        }
    }
}

/// Summary statistics and insights over a ranked score list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub timestamp: DateTime<Utc>,
    pub top_sectors: Vec<SectorRank>,
    pub bottom_sectors: Vec<SectorRank>,
    pub score_distribution: ScoreDistribution,
    pub top_sector_drivers: Vec<String>,
    pub weights_used: ScoringWeights,
}

/// Driver labels for a single sector's components.
pub fn drivers(score: &SectorScore) -> Vec<String> {
    Signal::ALL
        .iter()
        .filter(|s| score.component(**s) >= DRIVER_THRESHOLD)
        .map(|s| s.driver_label().to_string())
        .collect()
}

impl SectorScorer {
    /// Summarize a ranked score list, stamped with the current time.
    pub fn summary_report(&self, scores: &[SectorScore]) -> SummaryReport {
        self.summary_report_at(scores, Utc::now())
    }

    /// Summarize a ranked score list with an explicit generation time.
    pub fn summary_report_at(&self, scores: &[SectorScore], timestamp: DateTime<Utc>) -> SummaryReport {
        let top_sectors = scores.iter().take(HEADLINE_COUNT).map(SectorRank::from).collect();
        let bottom_sectors = scores[scores.len().saturating_sub(HEADLINE_COUNT)..]
            .iter()
            .map(SectorRank::from)
            .collect();

        SummaryReport {
            timestamp,
            top_sectors,
            bottom_sectors,
            score_distribution: ScoreDistribution::from_scores(scores),
            top_sector_drivers: scores.first().map(drivers).unwrap_or_default(),
            weights_used: *self.weights(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::composite::rank;
    use crate::scoring::test_support::full_snapshot;

    fn record(sector: &str, components: [f64; 5], opportunity: f64) -> SectorScore {
        SectorScore {
            sector: sector.to_string(),
            opportunity_score: opportunity,
            rank: 0,
            momentum_score: components[0],
            valuation_score: components[1],
            growth_score: components[2],
            innovation_score: components[3],
            macro_score: components[4],
            price_return_3mo: None,
            price_return_6mo: None,
            price_return_12mo: None,
            relative_strength: None,
            forward_pe: None,
            employment_growth: None,
            rd_intensity: None,
        }
    }

    #[test]
    fn drivers_follow_declaration_order() {
        let top = record("Energy", [75.0, 60.0, 80.0, 40.0, 55.0], 66.0);
        assert_eq!(drivers(&top), vec!["strong momentum", "employment growth"]);

        let boundary = record("Energy", [70.0, 69.99, 50.0, 70.0, 100.0], 66.0);
        assert_eq!(
            drivers(&boundary),
            vec!["strong momentum", "high R&D investment", "favorable macro positioning"]
        );
    }

    #[test]
    fn empty_scores_give_zeroed_report() {
        let report = SectorScorer::default().summary_report(&[]);
        assert!(report.top_sectors.is_empty());
        assert!(report.bottom_sectors.is_empty());
        assert!(report.top_sector_drivers.is_empty());
        assert_eq!(report.score_distribution, ScoreDistribution::default());
        assert_eq!(report.weights_used, ScoringWeights::default());
    }

    #[test]
    fn fewer_than_three_sectors() {
        let mut scores = vec![
            record("Energy", [50.0; 5], 40.0),
            record("Utilities", [80.0; 5], 60.0),
        ];
        rank(&mut scores);
        let report = SectorScorer::default().summary_report(&scores);

        assert_eq!(report.top_sectors.len(), 2);
        assert_eq!(report.bottom_sectors.len(), 2);
        assert_eq!(report.top_sectors[0].sector, "Utilities");
        assert_eq!(report.bottom_sectors[1].sector, "Energy");
        assert_eq!(report.top_sector_drivers.len(), 5);
    }

    #[test]
    fn distribution_statistics() {
        let mut scores = vec![
            record("A", [50.0; 5], 40.0),
            record("B", [50.0; 5], 61.5),
            record("C", [50.0; 5], 55.25),
            record("D", [50.0; 5], 47.0),
        ];
        rank(&mut scores);
        let dist = ScoreDistribution::from_scores(&scores);
        assert_eq!(dist.max, 61.5);
        assert_eq!(dist.min, 40.0);
        assert_eq!(dist.spread, 21.5);
        assert_eq!(dist.average, round2((40.0 + 61.5 + 55.25 + 47.0) / 4.0));
    }

    #[test]
    fn headline_sectors_come_from_both_ends() {
        let scorer = SectorScorer::default();
        let scores = scorer.calculate_scores(&full_snapshot());
        let report = scorer.summary_report(&scores);

        let top: Vec<_> = report.top_sectors.iter().map(|r| r.rank).collect();
        let bottom: Vec<_> = report.bottom_sectors.iter().map(|r| r.rank).collect();
        assert_eq!(top, vec![1, 2, 3]);
        assert_eq!(bottom, vec![9, 10, 11]);
        assert!(report.score_distribution.spread >= 0.0);
        assert_eq!(report.top_sector_drivers, drivers(&scores[0]));
    }
}
