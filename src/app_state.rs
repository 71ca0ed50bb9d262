// =============================================================================
// Central Application State
// =============================================================================
//
// Ties the runtime configuration to the snapshot store.  Handlers hold an
// `Arc<AppState>`; scoring itself never touches shared mutable state, it only
// reads the `Arc<MarketSnapshot>` it was handed.
// =============================================================================

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::runtime_config::RuntimeConfig;
use crate::scoring::ScoringWeights;
use crate::snapshot_store::{SnapshotInfo, SnapshotStore};
use crate::types::MarketSnapshot;

pub struct AppState {
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,
    pub snapshots: SnapshotStore,
    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: RuntimeConfig, snapshot: MarketSnapshot) -> Self {
        Self {
            runtime_config: Arc::new(RwLock::new(config)),
            snapshots: SnapshotStore::new(snapshot),
            start_time: std::time::Instant::now(),
        }
    }

    /// Weights configured for requests that do not supply their own.
    pub fn default_weights(&self) -> ScoringWeights {
        self.runtime_config.read().weights
    }

    /// Re-read the configured snapshot file and swap it in.
    pub fn reload_snapshot(&self) -> Result<u64> {
        let path = self.runtime_config.read().snapshot_path.clone();
        match self.snapshots.reload_from_file(&path) {
            Ok(version) => {
                info!(path = %path, version, "snapshot reloaded");
                Ok(version)
            }
            Err(e) => {
                warn!(path = %path, error = %e, "snapshot reload failed, keeping previous");
                Err(e)
            }
        }
    }

    pub fn snapshot_info(&self) -> SnapshotInfo {
        let max_age = self.runtime_config.read().snapshot_max_age_secs;
        self.snapshots.info(max_age, Utc::now())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_with_missing_file_keeps_state() {
        let config = RuntimeConfig {
            snapshot_path: "/nonexistent/snapshot.json".into(),
            ..Default::default()
        };
        let state = AppState::new(config, MarketSnapshot::default());
        assert!(state.reload_snapshot().is_err());
        assert_eq!(state.snapshots.version(), 1);
        assert_eq!(state.snapshot_info().version, 1);
    }

    #[test]
    fn default_weights_come_from_config() {
        let mut config = RuntimeConfig::default();
        config.weights.growth = 0.9;
        let state = AppState::new(config, MarketSnapshot::default());
        assert_eq!(state.default_weights().growth, 0.9);
    }
}
