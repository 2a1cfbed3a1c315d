//! Worker verification endpoint
//!
//! One verification attempt runs: validate input, wait the configured
//! artificial delay, match against the in-memory collection, then confirm
//! the single remote status update. The record is never reported (or cached)
//! as verified unless the remote write succeeded, so an update failure after
//! a successful match still surfaces as a verification failure.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use ftv_common::matcher::find_match;
use ftv_common::model::{factory_keys, WorkerRecord};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub factory: Option<String>,
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: String,
    pub worker: WorkerRecord,
}

#[derive(Debug, Serialize)]
pub struct FactoriesResponse {
    pub factories: Vec<String>,
}

/// GET /api/factories
///
/// Distinct factory keys for the portal's selector buttons.
pub async fn list_factories(State(state): State<AppState>) -> Json<FactoriesResponse> {
    let records = state.records.read().await;
    Json(FactoriesResponse {
        factories: factory_keys(&records),
    })
}

/// POST /api/verify
pub async fn verify_worker(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, VerifyError> {
    let factory = request
        .factory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let input = request
        .input
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    // Rejected before any remote call
    let (Some(factory), Some(input)) = (factory, input) else {
        return Err(VerifyError::MissingInput);
    };

    // Fixed delay smoothing the caller's loading state; not cancellable
    tokio::time::sleep(state.config.verify_delay()).await;

    let policy = state.config.match_policy();
    let matched = {
        let records = state.records.read().await;
        find_match(&records, factory, input, &policy).cloned()
    };

    let Some(worker) = matched else {
        // Deliberately the same message for a wrong factory and a wrong
        // identifier, so responses do not reveal which factories contain
        // which identifiers
        return Err(VerifyError::NoMatch);
    };

    let now = Utc::now();
    let updated = state
        .store
        .mark_verified(worker.id, now, state.config.verify_only_once)
        .await
        .map_err(|e| {
            warn!(id = worker.id, error = %e, "Status update failed after successful match");
            VerifyError::UpdateFailed
        })?;

    {
        let mut records = state.records.write().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == worker.id) {
            record.status = true;
            record.verified_date = updated.verified_date.or(Some(now));
        }
    }

    info!(id = worker.id, factory = %worker.factory, "Worker verified");

    Ok(Json(VerifyResponse {
        status: "success".to_string(),
        worker: updated,
    }))
}

/// Verification errors
#[derive(Debug)]
pub enum VerifyError {
    MissingInput,
    NoMatch,
    UpdateFailed,
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            VerifyError::MissingInput => (
                StatusCode::BAD_REQUEST,
                "Please select a factory and enter NIK/KTP",
            ),
            VerifyError::NoMatch => (
                StatusCode::NOT_FOUND,
                "Verification failed. Please check your input.",
            ),
            VerifyError::UpdateFailed => (
                StatusCode::BAD_GATEWAY,
                "Verification succeeded but failed to update status. Please try again.",
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
