//! Session-token middleware for dashboard routes
//!
//! Requests carry the token from `POST /api/session` in a header; a missing
//! or expired token gets 401 and the caller is expected to return to the
//! entry view. Applied to dashboard routes only, never to the portal
//! verification routes or /health.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::AppState;

/// Header carrying the dashboard session token
pub const SESSION_HEADER: &str = "x-session-token";

/// Session-token middleware
pub async fn session_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GateError> {
    let token = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(GateError::MissingToken)?;

    if !state.gate.check(token) {
        return Err(GateError::SessionExpired);
    }

    Ok(next.run(request).await)
}

/// Gate error types for HTTP responses
#[derive(Debug)]
pub enum GateError {
    MissingToken,
    SessionExpired,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let message = match self {
            GateError::MissingToken => "Missing session token",
            GateError::SessionExpired => "Session expired or invalid",
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
