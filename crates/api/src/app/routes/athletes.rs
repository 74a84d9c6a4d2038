use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use trackhub_core::AthleteId;
use trackhub_infra::AthleteView;
use trackhub_roster::AthleteInput;

use crate::app::services::AppServices;
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_athletes).post(create_athlete))
        .route("/:id", get(get_athlete).put(update_athlete).delete(delete_athlete))
        .route("/:id/items", get(list_athlete_items))
}

fn parse_id(raw: &str) -> Result<AthleteId, axum::response::Response> {
    raw.parse().map_err(|_| errors::invalid_id("athlete"))
}

pub async fn list_athletes(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.reads.list_athletes().await {
        Ok(athletes) => Json(athletes).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_athlete(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.reads.get_athlete(&id).await {
        Ok(athlete) => Json(athlete).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_athlete(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<AthleteInput>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.athletes.create(body).await {
        // A new athlete holds nothing yet.
        Ok(athlete) => (StatusCode::CREATED, Json(AthleteView::new(athlete, Vec::new()))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_athlete(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<AthleteInput>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    if let Err(e) = services.athletes.update(&id, body).await {
        return errors::service_error_to_response(e);
    }
    match services.reads.get_athlete(&id).await {
        Ok(athlete) => Json(athlete).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_athlete(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.athletes.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_athlete_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.reads.list_athlete_items(&id).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
