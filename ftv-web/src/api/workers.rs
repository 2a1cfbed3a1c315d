//! Dashboard worker listing with compound filters and pagination

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ftv_common::model::WorkerRecord;
use ftv_common::view::{
    apply_filters, calculate_pagination, department_options, page_slice, reconcile_department,
    StatusFilter, WorkerFilter,
};

use crate::AppState;

/// Query parameters for the worker listing; every filter defaults to
/// "no constraint", page defaults to 1
#[derive(Debug, Deserialize)]
pub struct WorkersQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
    /// "all", "verified", or "unverified"
    pub status: Option<String>,
    pub factory: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

/// Listing response with pagination metadata
#[derive(Debug, Serialize)]
pub struct WorkersResponse {
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub workers: Vec<WorkerRecord>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<String>,
}

/// Translate query parameters into a view-model filter; "all" and empty
/// strings mean "no constraint" like the dashboard's select defaults
pub(crate) fn parse_filter(query: &WorkersQuery) -> Result<WorkerFilter, ListError> {
    let status = match query.status.as_deref() {
        None | Some("") | Some("all") => StatusFilter::All,
        Some("verified") => StatusFilter::Verified,
        Some("unverified") => StatusFilter::Unverified,
        Some(other) => return Err(ListError::InvalidStatus(other.to_string())),
    };

    let unconstrained = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
            .map(str::to_string)
    };

    Ok(WorkerFilter {
        status,
        factory: unconstrained(&query.factory),
        department: unconstrained(&query.department),
        search: query.search.as_deref().filter(|s| !s.is_empty()).map(str::to_string),
    })
}

/// GET /api/workers
///
/// Filters are conjunctive; a department no longer offered under the
/// selected factory silently resets; the page clamps into range (consumers
/// restart at page 1 when they change a filter).
pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<WorkersQuery>,
) -> Result<Json<WorkersResponse>, ListError> {
    let records = state.records.read().await;

    let mut filter = parse_filter(&query)?;
    reconcile_department(&mut filter, &records);

    let filtered = apply_filters(&records, &filter);
    let page_size = state.config.page_size;
    let p = calculate_pagination(filtered.len() as i64, query.page, page_size);
    let workers = page_slice(&filtered, &p, page_size)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    Ok(Json(WorkersResponse {
        total_results: filtered.len() as i64,
        page: p.page,
        page_size,
        total_pages: p.total_pages,
        workers,
    }))
}

/// GET /api/departments?factory=...
///
/// Department options derived from the records matching the factory filter.
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<DepartmentsQuery>,
) -> Json<DepartmentsResponse> {
    let records = state.records.read().await;
    let factory = query
        .factory
        .as_deref()
        .filter(|f| !f.is_empty() && *f != "all");

    Json(DepartmentsResponse {
        departments: department_options(&records, factory),
    })
}

#[derive(Debug, Deserialize)]
pub struct DepartmentsQuery {
    pub factory: Option<String>,
}

/// Listing errors
#[derive(Debug)]
pub enum ListError {
    InvalidStatus(String),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ListError::InvalidStatus(value) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid status filter: {}", value),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
