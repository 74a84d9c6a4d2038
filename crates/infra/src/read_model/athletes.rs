use std::collections::HashMap;

use serde::Serialize;

use trackhub_core::{AthleteId, DomainError, InventoryItemId};
use trackhub_inventory::{InventoryItem, ItemStatus};
use trackhub_roster::Athlete;

use crate::error::ServiceResult;
use crate::store::{Collection, DocumentStore, codec};

use super::ReadModel;

/// Short form of an item held by an athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedItem {
    pub id: InventoryItemId,
    pub item_id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: ItemStatus,
}

impl From<InventoryItem> for AssignedItem {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            item_id: item.item_id,
            item_type: item.item_type,
            status: item.status,
        }
    }
}

/// Athlete with derived display fields and the live list of held items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteView {
    #[serde(flatten)]
    pub athlete: Athlete,
    pub name: String,
    pub group_name: &'static str,
    pub assigned_items: Vec<AssignedItem>,
}

impl AthleteView {
    pub fn new(athlete: Athlete, assigned_items: Vec<AssignedItem>) -> Self {
        Self {
            name: athlete.name(),
            group_name: athlete.group_name(),
            athlete,
            assigned_items,
        }
    }
}

impl<S: DocumentStore> ReadModel<S> {
    /// Whole roster, sorted by last then first name.
    pub async fn list_athletes(&self) -> ServiceResult<Vec<AthleteView>> {
        let athletes: Vec<Athlete> = codec::fetch_all(&self.store, Collection::Athletes, None).await?;
        let items: Vec<InventoryItem> = codec::fetch_all(&self.store, Collection::Inventory, None).await?;

        let mut held: HashMap<AthleteId, Vec<AssignedItem>> = HashMap::new();
        for item in items {
            if let Some(athlete_id) = item.assigned_to.clone() {
                held.entry(athlete_id).or_default().push(item.into());
            }
        }

        let mut views: Vec<AthleteView> = athletes
            .into_iter()
            .map(|athlete| {
                let items = held.remove(&athlete.id).unwrap_or_default();
                AthleteView::new(athlete, items)
            })
            .collect();

        views.sort_by(|a, b| {
            a.athlete
                .last_name
                .to_lowercase()
                .cmp(&b.athlete.last_name.to_lowercase())
                .then_with(|| {
                    a.athlete
                        .first_name
                        .to_lowercase()
                        .cmp(&b.athlete.first_name.to_lowercase())
                })
        });
        Ok(views)
    }

    pub async fn get_athlete(&self, id: &AthleteId) -> ServiceResult<AthleteView> {
        let athlete: Athlete = codec::fetch(&self.store, Collection::Athletes, id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found("athlete not found"))?;

        let items = self
            .list_athlete_items(id)
            .await?
            .into_iter()
            .map(AssignedItem::from)
            .collect();
        Ok(AthleteView::new(athlete, items))
    }
}
