//! Export row sets for the external document encoders
//!
//! The encoders (printable report, spreadsheet) consume a column list plus
//! rows in a fixed order; these endpoints serve exactly that from the
//! filtered collection or the progress series.

use axum::{
    extract::{Query, State},
    Json,
};

use ftv_common::export::{progress_report, worker_report, ReportTable};
use ftv_common::stats::compute_series;
use ftv_common::view::{apply_filters, reconcile_department};

use crate::api::workers::{parse_filter, ListError, WorkersQuery};
use crate::AppState;

/// GET /api/export/workers
///
/// Same filters as the listing, without pagination: the full filtered set in
/// export column order.
pub async fn export_workers(
    State(state): State<AppState>,
    Query(query): Query<WorkersQuery>,
) -> Result<Json<ReportTable>, ListError> {
    let records = state.records.read().await;

    let mut filter = parse_filter(&query)?;
    reconcile_department(&mut filter, &records);
    let filtered = apply_filters(&records, &filter);

    Ok(Json(worker_report(&filtered)))
}

/// GET /api/export/progress
///
/// Progress report rows, one per tracked date plus a totals row.
pub async fn export_progress(State(state): State<AppState>) -> Json<ReportTable> {
    let records = state.records.read().await;
    Json(progress_report(&compute_series(&records)))
}
