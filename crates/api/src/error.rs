//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_core::BillingError;
use clinic_shared::AppError;
use serde_json::json;
use tracing::error;

/// Maps a billing error to `{ "error": code, "message": text }`.
///
/// Server-side failures are logged and answered with a generic message.
pub fn billing_error_response(err: BillingError) -> Response {
    let code = err.error_code();
    let message = err.to_string();
    let app_error = AppError::from(err);
    let status =
        StatusCode::from_u16(app_error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %app_error, "Request failed");
        return internal_error();
    }

    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// 404 with a resource-specific message.
pub fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": message
        })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
