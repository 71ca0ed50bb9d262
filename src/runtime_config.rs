// =============================================================================
// Runtime Configuration — service settings loaded from JSON
// =============================================================================
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file.  Environment overrides are applied by `main`
// after loading.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scoring::ScoringWeights;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

fn default_snapshot_max_age_secs() -> u64 {
    12 * 60 * 60
}

fn default_refresh_interval_secs() -> u64 {
    60 * 60
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the API server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// JSON snapshot document written by the external fetcher.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// A snapshot older than this is reported as stale.
    #[serde(default = "default_snapshot_max_age_secs")]
    pub snapshot_max_age_secs: u64,

    /// How often the snapshot file is re-read. Zero disables the refresh task.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Weights used when a request does not supply its own.
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            snapshot_path: default_snapshot_path(),
            snapshot_max_age_secs: default_snapshot_max_age_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            weights: ScoringWeights::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            snapshot_path = %config.snapshot_path,
            "runtime config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
        assert_eq!(cfg.snapshot_path, "snapshot.json");
        assert_eq!(cfg.snapshot_max_age_secs, 43_200);
        assert_eq!(cfg.refresh_interval_secs, 3_600);
        assert_eq!(cfg.weights, ScoringWeights::default());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000");
        assert!((cfg.weights.momentum - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "bind_addr": "127.0.0.1:9000", "weights": { "macro": 0.4 } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert!((cfg.weights.macro_ - 0.4).abs() < f64::EPSILON);
        assert!((cfg.weights.valuation - 0.20).abs() < f64::EPSILON);
        assert_eq!(cfg.refresh_interval_secs, 3_600);
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = RuntimeConfig::load("/nonexistent/sector_config.json").unwrap_err();
        assert!(err.to_string().contains("failed to read runtime config"));
    }
}
