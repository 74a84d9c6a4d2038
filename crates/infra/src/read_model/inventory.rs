use std::collections::HashMap;

use serde::Serialize;

use trackhub_core::{AthleteId, DomainError, InventoryItemId};
use trackhub_inventory::InventoryItem;
use trackhub_roster::Athlete;

use crate::error::ServiceResult;
use crate::store::{Collection, DocumentStore, Filter, StoreError, codec};

use super::ReadModel;

/// Inventory item plus the display name of its assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub assigned_to_name: Option<String>,
}

impl InventoryItemView {
    pub fn new(item: InventoryItem, assigned_to_name: Option<String>) -> Self {
        Self {
            item,
            assigned_to_name,
        }
    }
}

/// Display name of an athlete, or `None` if the document is gone.
pub(crate) async fn athlete_name<S>(store: &S, id: &AthleteId) -> Result<Option<String>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let athlete: Option<Athlete> = codec::fetch(store, Collection::Athletes, id.as_str()).await?;
    Ok(athlete.map(|a| a.name()))
}

impl<S: DocumentStore> ReadModel<S> {
    /// Every item, with assignee names joined in.
    ///
    /// Each distinct assignee is looked up once.
    pub async fn list_inventory(&self) -> ServiceResult<Vec<InventoryItemView>> {
        let items: Vec<InventoryItem> = codec::fetch_all(&self.store, Collection::Inventory, None).await?;

        let mut names: HashMap<AthleteId, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let name = match &item.assigned_to {
                Some(athlete_id) => match names.get(athlete_id) {
                    Some(cached) => cached.clone(),
                    None => {
                        let name = athlete_name(&self.store, athlete_id).await?;
                        names.insert(athlete_id.clone(), name.clone());
                        name
                    }
                },
                None => None,
            };
            views.push(InventoryItemView::new(item, name));
        }
        Ok(views)
    }

    /// One item with its assignee name.
    pub async fn get_inventory(&self, id: &InventoryItemId) -> ServiceResult<InventoryItemView> {
        let item: InventoryItem = codec::fetch(&self.store, Collection::Inventory, id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found("inventory item not found"))?;

        let name = match &item.assigned_to {
            Some(athlete_id) => athlete_name(&self.store, athlete_id).await?,
            None => None,
        };
        Ok(InventoryItemView::new(item, name))
    }

    /// Items whose `assignedTo` is this athlete (live query, not the mirrored flag).
    pub async fn list_athlete_items(&self, athlete_id: &AthleteId) -> ServiceResult<Vec<InventoryItem>> {
        let filter = Filter::eq("assignedTo", athlete_id.as_str());
        Ok(codec::fetch_all(&self.store, Collection::Inventory, Some(&filter)).await?)
    }
}
