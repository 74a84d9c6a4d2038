use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use trackhub_core::ScheduleEventId;
use trackhub_schedule::ScheduleEventInput;

use crate::app::services::AppServices;
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
}

fn parse_id(raw: &str) -> Result<ScheduleEventId, axum::response::Response> {
    raw.parse().map_err(|_| errors::invalid_id("event"))
}

pub async fn list_events(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.schedule.list().await {
        Ok(events) => Json(events).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.schedule.get(&id).await {
        Ok(event) => Json(event).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ScheduleEventInput>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.schedule.create(body).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ScheduleEventInput>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.schedule.update(&id, body).await {
        Ok(event) => Json(event).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.schedule.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
