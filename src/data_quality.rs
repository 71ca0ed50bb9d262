// =============================================================================
// Data Quality — per-source coverage report over a snapshot
// =============================================================================
//
// Each upstream source maps to ok / warning / error from how much of the
// sector universe it covers.  The overall status is the worst of the four.

use serde::Serialize;

use crate::types::MarketSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataSourceStatus {
    pub name: &'static str,
    pub status: SourceStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQualityReport {
    pub sources: Vec<DataSourceStatus>,
    pub overall_status: SourceStatus,
}

fn grade(
    name: &'static str,
    count: usize,
    ok_at: usize,
    when_empty: SourceStatus,
    unit: &str,
    empty_message: &str,
) -> DataSourceStatus {
    let (status, message) = if count >= ok_at {
        (SourceStatus::Ok, format!("{count} {unit} loaded"))
    } else if count > 0 {
        (SourceStatus::Warning, format!("Only {count} {unit} loaded"))
    } else {
        (when_empty, empty_message.to_string())
    };
    DataSourceStatus {
        name,
        status,
        message,
    }
}

/// Grade each data source in the snapshot.
pub fn assess(snapshot: &MarketSnapshot) -> DataQualityReport {
    let non_zero_rd = snapshot
        .rd_data
        .values()
        .filter(|v| v.is_finite() && **v > 0.0)
        .count();

    let sources = vec![
        grade(
            "Yahoo Finance",
            snapshot.sector_prices.len(),
            10,
            SourceStatus::Error,
            "sectors",
            "No price data available",
        ),
        grade(
            "FRED",
            snapshot.macro_data.len(),
            3,
            SourceStatus::Warning,
            "series",
            "No macro series loaded",
        ),
        grade(
            "BLS",
            snapshot.employment_data.len(),
            8,
            SourceStatus::Warning,
            "sectors",
            "No employment data",
        ),
        grade(
            "Damodaran",
            non_zero_rd,
            8,
            SourceStatus::Error,
            "sectors with R&D data",
            "R&D data failed to load",
        ),
    ];

    let overall_status = sources
        .iter()
        .map(|s| s.status)
        .max()
        .unwrap_or(SourceStatus::Ok);

    DataQualityReport {
        sources,
        overall_status,
    }
}
