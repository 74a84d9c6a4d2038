use axum::Json;

use trackhub_roster::{GROUPS, Group};

pub async fn list_groups() -> Json<&'static [Group]> {
    Json(&GROUPS)
}
