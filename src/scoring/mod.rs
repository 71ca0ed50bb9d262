// =============================================================================
// Scoring Module
// =============================================================================
//
// Combines the five normalized signal scores into a weighted opportunity
// score per sector, ranks sectors, and summarizes the result.  Everything
// here is a pure function of (snapshot, weights) and safe to call from any
// number of request handlers concurrently.

pub mod composite;
pub mod summary;
pub mod weights;

pub use composite::{run_analysis, SectorScore, SectorScorer};
pub use summary::SummaryReport;
pub use weights::ScoringWeights;
