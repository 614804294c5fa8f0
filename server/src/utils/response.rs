use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub fn success_message(message: impl Into<String>) -> Response {
    let body = MessageResponse {
        success: true,
        message: message.into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(status: StatusCode, message: impl Into<String>, details: Option<String>) -> Response {
    let body = ErrorResponse {
        error: message.into(),
        details,
    };
    (status, Json(body)).into_response()
}

/// Preflight answer for routes that accept `OPTIONS`.
pub fn empty_ok() -> Response {
    StatusCode::OK.into_response()
}

pub fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}
