//! Dashboard session issuance

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub passkey: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_in_secs: u64,
}

/// POST /api/session
///
/// Exchanges the shared dashboard passkey for a session token.
pub async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, SessionApiError> {
    let token = state
        .gate
        .issue(&request.passkey)
        .map_err(|_| SessionApiError::InvalidPasskey)?;

    Ok(Json(SessionResponse {
        expires_in_secs: state.gate.ttl().as_secs(),
        token,
    }))
}

/// Session API errors
#[derive(Debug)]
pub enum SessionApiError {
    InvalidPasskey,
}

impl IntoResponse for SessionApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SessionApiError::InvalidPasskey => {
                (StatusCode::UNAUTHORIZED, "Invalid passkey. Please try again.")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
