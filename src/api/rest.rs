// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Scoring endpoints live under `/api/v1/`.  Every request scores the snapshot
// that is current when it arrives; a concurrent reload swaps the store's
// snapshot without affecting requests already in flight.
//
// Weight overrides come from the query string (`?momentum=0.4&macro=0.1`).
// Signals not mentioned keep their default weight and the scorer rescales the
// result to sum to 1.0.
//
// CORS is configured permissively; the service holds no user data.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::app_state::AppState;
use crate::data_quality;
use crate::scoring::{run_analysis, ScoringWeights, SectorScore, SectorScorer, SummaryReport};
use crate::sectors::{canonical_sector, sector_names, MARKET_BENCHMARK};
use crate::signals::Signal;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message.into(),
        })),
    )
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // ── Scores ──────────────────────────────────────────────────
        .route("/api/v1/scores", get(scores))
        .route("/api/v1/scores/summary", get(summary))
        .route("/api/v1/scores/:sector", get(sector_score))
        // ── Data ────────────────────────────────────────────────────
        .route("/api/v1/sectors", get(sectors))
        .route("/api/v1/data/quality", get(data_quality))
        .route("/api/v1/snapshot", get(snapshot_info))
        .route("/api/v1/snapshot/reload", post(snapshot_reload))
        // ── Middleware & State ───────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Weight overrides
// =============================================================================

/// Parse per-signal weight overrides from query parameters and layer them on
/// `base`.  Values that are not finite non-negative numbers are ignored.
fn parse_weight_overrides(
    base: ScoringWeights,
    params: &HashMap<String, String>,
) -> Option<ScoringWeights> {
    let overrides = Signal::ALL.iter().filter_map(|signal| {
        let raw = params.get(signal.name())?;
        let weight: f64 = raw.trim().parse().ok()?;
        (weight.is_finite() && weight >= 0.0).then_some((*signal, weight))
    });
    base.with_overrides(overrides)
}

fn weights_for(state: &AppState, params: &HashMap<String, String>) -> ScoringWeights {
    let base = state.default_weights();
    parse_weight_overrides(base, params).unwrap_or(base)
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    snapshot_version: u64,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        snapshot_version: state.snapshots.version(),
        uptime_secs: state.uptime_secs(),
        server_time: Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Scores
// =============================================================================

#[derive(Serialize)]
struct ScoresResponse {
    scores: Vec<SectorScore>,
    weights_used: ScoringWeights,
    timestamp: DateTime<Utc>,
}

async fn scores(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let snapshot = state.snapshots.current();
    let scorer = SectorScorer::new(Some(weights_for(&state, &params)));
    let scores = scorer.calculate_scores(&snapshot);

    debug!(sectors = scores.len(), "scores served");
    Json(ScoresResponse {
        scores,
        weights_used: *scorer.weights(),
        timestamp: Utc::now(),
    })
}

async fn summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<SummaryReport> {
    let snapshot = state.snapshots.current();
    let (_, report) = run_analysis(&snapshot, Some(weights_for(&state, &params)));
    Json(report)
}

async fn sector_score(
    State(state): State<Arc<AppState>>,
    Path(sector): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SectorScore>, ApiError> {
    let Some(name) = canonical_sector(&sector) else {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Sector '{sector}' not found"),
        ));
    };

    let snapshot = state.snapshots.current();
    let scores =
        SectorScorer::new(Some(weights_for(&state, &params))).calculate_scores(&snapshot);
    scores
        .into_iter()
        .find(|s| s.sector == name)
        .map(Json)
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Sector '{sector}' not found"),
            )
        })
}

// =============================================================================
// Data
// =============================================================================

async fn sectors() -> impl IntoResponse {
    Json(serde_json::json!({
        "sectors": sector_names().collect::<Vec<_>>(),
        "benchmark": MARKET_BENCHMARK,
    }))
}

async fn data_quality(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshots.current();
    Json(data_quality::assess(&snapshot))
}

async fn snapshot_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.snapshot_info())
}

async fn snapshot_reload(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let version = state.reload_snapshot().map_err(|e| {
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "reload_failed", format!("{e:#}"))
    })?;

    info!(version, "snapshot reloaded via API");
    Ok(Json(serde_json::json!({
        "version": version,
        "message": "Snapshot reloaded",
    })))
}
