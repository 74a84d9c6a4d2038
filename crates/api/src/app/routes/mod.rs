use axum::{Router, routing::get};

pub mod athletes;
pub mod events;
pub mod groups;
pub mod inventory;
pub mod system;

/// Router for all authenticated endpoints (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/groups", get(groups::list_groups))
        .nest("/inventory", inventory::router())
        .nest("/athletes", athletes::router())
        .nest("/events", events::router())
}
