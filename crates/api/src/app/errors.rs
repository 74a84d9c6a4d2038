use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use trackhub_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        ServiceError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        // The addressed resource exists; something the body points at does not.
        ServiceError::MissingReference(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        ServiceError::Dependency(e) => {
            tracing::error!(error = %e, "document store failure");
            internal_error(e.to_string())
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}

pub fn internal_error(details: impl Into<String>) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({
            "error": "Internal server error",
            "details": details.into(),
        })),
    )
        .into_response()
}

/// Malformed or non-JSON request bodies.
pub fn body_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

pub fn invalid_id(what: &str) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, format!("invalid {what} id"))
}
