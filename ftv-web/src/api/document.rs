//! Reference document download
//!
//! The handbook itself lives in external object storage; the portal only
//! hands out the location.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

use crate::AppState;

/// GET /api/document
///
/// Redirects to the configured reference document.
pub async fn document_redirect(
    State(state): State<AppState>,
) -> Result<Redirect, DocumentError> {
    if state.config.document_url.is_empty() {
        return Err(DocumentError::NotConfigured);
    }
    Ok(Redirect::temporary(&state.config.document_url))
}

/// Document errors
#[derive(Debug)]
pub enum DocumentError {
    NotConfigured,
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "No reference document is configured",
        }));

        (StatusCode::NOT_FOUND, body).into_response()
    }
}
