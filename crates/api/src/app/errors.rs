use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use siteboard_core::{AppError, DomainError};

/// Map a domain failure to its HTTP response.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Report an infrastructure failure and terminate the request.
///
/// Errors that recorded a call stack at creation are logged with their first
/// two frames; plain errors log their formatted text. Either way the client
/// gets a 502 whose body is the error text.
pub fn abort_with_error(err: &AppError) -> axum::response::Response {
    match err.frames(2) {
        Some(frames) => tracing::error!(error = %err, ?frames, "aborting request"),
        None => tracing::error!("{err}"),
    }

    (StatusCode::BAD_GATEWAY, err.to_string()).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
