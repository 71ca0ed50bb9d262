// =============================================================================
// Sector Opportunity Analyzer — Main Entry Point
// =============================================================================
//
// Scores the eleven GICS sectors from a market snapshot written by an external
// fetcher.  The snapshot file is re-read on a fixed cadence and on demand via
// the API; a snapshot that fails to load never replaces the current one.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod data_quality;
mod indicators;
mod runtime_config;
mod scoring;
mod sectors;
mod signals;
mod snapshot_store;
mod types;

use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;
use crate::snapshot_store::SnapshotStore;
use crate::types::MarketSnapshot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Sector Opportunity Analyzer starting up");

    let config_path =
        std::env::var("SECTOR_CONFIG").unwrap_or_else(|_| "sector_config.json".into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    if let Ok(port) = std::env::var("PORT") {
        config.bind_addr = format!("0.0.0.0:{}", port.trim());
    }
    if let Ok(addr) = std::env::var("SECTOR_BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(path) = std::env::var("SECTOR_SNAPSHOT_PATH") {
        config.snapshot_path = path;
    }

    info!(
        bind_addr = %config.bind_addr,
        snapshot_path = %config.snapshot_path,
        weights = ?config.weights,
        "Configuration resolved"
    );

    // ── 2. Initial snapshot ──────────────────────────────────────────────
    // Scoring still yields a complete (flat) ranking on an empty snapshot.
    let snapshot = SnapshotStore::load_from_file(&config.snapshot_path).unwrap_or_else(|e| {
        warn!(error = %e, "No usable snapshot at startup, serving neutral scores");
        MarketSnapshot::default()
    });
    info!(
        sectors = snapshot.sector_prices.len(),
        fetched_at = ?snapshot.fetched_at,
        "Initial snapshot loaded"
    );

    let refresh_secs = config.refresh_interval_secs;
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, snapshot));

    // ── 3. Periodic snapshot refresh ─────────────────────────────────────
    if refresh_secs > 0 {
        let refresh_state = state.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(refresh_secs));
            // The first tick fires immediately; the snapshot was just loaded.
            interval.tick().await;
            loop {
                interval.tick().await;
                let state = refresh_state.clone();
                // Failures are logged inside and the previous snapshot stays.
                if let Err(e) = tokio::task::spawn_blocking(move || state.reload_snapshot()).await {
                    error!(error = %e, "Snapshot refresh task panicked");
                }
            }
        });
        info!(every_secs = refresh_secs, "Snapshot refresh task launched");
    }

    // ── 4. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
