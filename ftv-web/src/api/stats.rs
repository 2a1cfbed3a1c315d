//! Dashboard aggregates: verification counts and progress series
//!
//! Pure recomputations over the current collection on every request; there
//! is no cached or incrementally patched aggregate state.

use axum::{extract::State, Json};

use ftv_common::stats::{compute_series, compute_stats, SeriesPoint, Stats};

use crate::AppState;

/// GET /api/stats
///
/// Total/verified/unverified counts with per-factory breakdowns.
pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let records = state.records.read().await;
    Json(compute_stats(&records))
}

/// GET /api/progress
///
/// Verifications per UTC calendar date and factory, ascending by date.
pub async fn get_progress(State(state): State<AppState>) -> Json<Vec<SeriesPoint>> {
    let records = state.records.read().await;
    Json(compute_series(&records))
}
