//! Request bodies that have no domain counterpart.
//!
//! Create/update bodies deserialize straight into the domain input types
//! (`ItemInput`, `AthleteInput`, `ScheduleEventInput`), which already carry
//! the wire names.

use serde::Deserialize;

/// Body of `PUT /api/inventory/:id/assign`. Missing, `null` and `""` all unassign.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    #[serde(default)]
    pub assigned_to: Option<String>,
}
