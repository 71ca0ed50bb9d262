// =============================================================================
// Snapshot Store — shared, replaceable market snapshot
// =============================================================================
//
// Readers clone the current `Arc<MarketSnapshot>` under a short read lock and
// score against their clone with no lock held.  A refresh builds a complete new
// snapshot off to the side and swaps it in under the write lock; readers that
// already hold the old `Arc` finish against it undisturbed.
//
// A failed reload never clears the current snapshot.
// =============================================================================

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::types::MarketSnapshot;

/// Point-in-time description of the held snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub version: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loaded_at: DateTime<Utc>,
    pub age_secs: i64,
    pub is_stale: bool,
    pub sector_series: usize,
    pub benchmark_bars: usize,
    pub macro_series: usize,
    pub employment_series: usize,
    pub rd_sectors: usize,
}

struct Slot {
    snapshot: Arc<MarketSnapshot>,
    loaded_at: DateTime<Utc>,
}

pub struct SnapshotStore {
    slot: RwLock<Slot>,
    version: AtomicU64,
}

impl SnapshotStore {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            slot: RwLock::new(Slot {
                snapshot: Arc::new(snapshot),
                loaded_at: Utc::now(),
            }),
            version: AtomicU64::new(1),
        }
    }

    /// The snapshot currently in effect.
    pub fn current(&self) -> Arc<MarketSnapshot> {
        self.slot.read().snapshot.clone()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Swap in a new snapshot. Returns the new version.
    pub fn replace(&self, snapshot: MarketSnapshot) -> u64 {
        let sectors = snapshot.sector_prices.len();
        {
            let mut slot = self.slot.write();
            slot.snapshot = Arc::new(snapshot);
            slot.loaded_at = Utc::now();
        }
        let version = self.version.fetch_add(1, Ordering::Relaxed) + 1;
        info!(version, sectors, "market snapshot replaced");
        version
    }

    /// Parse a snapshot document from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<MarketSnapshot> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;

        let snapshot: MarketSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse snapshot from {}", path.display()))?;

        validate(&snapshot)
            .with_context(|| format!("invalid snapshot in {}", path.display()))?;

        Ok(snapshot)
    }

    /// Load from disk and replace; the current snapshot survives any error.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<u64> {
        let snapshot = Self::load_from_file(path)?;
        Ok(self.replace(snapshot))
    }

    /// Describe the held snapshot. Age is measured from the fetch time when
    /// the snapshot carries one, otherwise from when it was loaded.
    pub fn info(&self, max_age_secs: u64, now: DateTime<Utc>) -> SnapshotInfo {
        let (snapshot, loaded_at) = {
            let slot = self.slot.read();
            (slot.snapshot.clone(), slot.loaded_at)
        };

        let reference = snapshot.fetched_at.unwrap_or(loaded_at);
        let age_secs = (now - reference).num_seconds();
        let is_stale = snapshot.fetched_at.is_none()
            || age_secs > i64::try_from(max_age_secs).unwrap_or(i64::MAX);

        SnapshotInfo {
            version: self.version(),
            fetched_at: snapshot.fetched_at,
            loaded_at,
            age_secs,
            is_stale,
            sector_series: snapshot.sector_prices.len(),
            benchmark_bars: snapshot.benchmark.len(),
            macro_series: snapshot.macro_data.len(),
            employment_series: snapshot.employment_data.len(),
            rd_sectors: snapshot.rd_data.len(),
        }
    }
}

/// Reject time series whose date and value arrays differ in length.
fn validate(snapshot: &MarketSnapshot) -> Result<()> {
    let series = snapshot
        .macro_data
        .iter()
        .map(|(name, ts)| ("macro", name, ts))
        .chain(
            snapshot
                .employment_data
                .iter()
                .map(|(name, ts)| ("employment", name, ts)),
        );

    for (kind, name, ts) in series {
        ensure!(
            ts.is_aligned(),
            "{kind} series '{name}' has {} dates but {} values",
            ts.dates.len(),
            ts.values.len()
        );
    }
    Ok(())
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(MarketSnapshot::default())
    }
}
