//! Inventory assignment engine.
//!
//! Keeps an inventory item and the athlete records it touches consistent:
//! the item's `assignedTo` is the source of truth, and the assignee's
//! `hasUniform`/`uniformId` mirror it.
//!
//! ## Operation shape
//!
//! ```text
//! read item (current state, never client-supplied "previous" values)
//!   ↓
//! validate transition           ── failure: nothing written
//!   ↓
//! verify new assignee exists     ── failure: nothing written
//!   ↓
//! write item
//!   ↓
//! clear previous athlete, set new athlete
//! ```
//!
//! Delete is the exception: the assignee is cleared *before* the item is
//! removed.
//!
//! Writes are sequential, not transactional. If a later write fails the
//! earlier ones stay, and the error surfaces as [`ServiceError::Dependency`].
//! Concurrent callers on the same item can interleave between the read and
//! the writes; the last writer wins on each document independently.

use chrono::Utc;

use trackhub_core::{AthleteId, DomainError, InventoryItemId};
use trackhub_inventory::{
    AssignmentChange, InventoryItem, ItemDraft, ItemInput, ensure_assignable, normalize_assignee,
};
use trackhub_roster::{Athlete, UniformStatus};

use crate::error::{ServiceError, ServiceResult};
use crate::read_model::InventoryItemView;
use crate::read_model::inventory::athlete_name;
use crate::store::{Collection, DocumentStore, StoreError, codec};

const ATHLETE_MISSING: &str = "selected athlete does not exist";
const ITEM_MISSING: &str = "inventory item not found";

/// Create/update/assign/delete for inventory items, with athlete bookkeeping.
#[derive(Debug, Clone)]
pub struct AssignmentEngine<S> {
    store: S,
}

impl<S: DocumentStore> AssignmentEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an item. If it is checked out to an athlete, that athlete is
    /// marked as holding it.
    ///
    /// The returned view has no `assignedToName`; callers that need it re-read
    /// through the read model.
    #[tracing::instrument(name = "inventory.create", skip_all, fields(item_id = tracing::field::Empty))]
    pub async fn create(&self, input: ItemInput) -> ServiceResult<InventoryItemView> {
        let draft = ItemDraft::parse(input)?;
        if let Some(athlete_id) = &draft.assigned_to {
            self.require_athlete(athlete_id).await?;
        }

        let new = InventoryItem::create(draft, Utc::now());
        let id = codec::insert(&self.store, Collection::Inventory, &new).await?;
        let item = new.into_item(InventoryItemId::from(id));
        tracing::Span::current().record("item_id", tracing::field::display(&item.id));
        tracing::info!(item_code = %item.item_id, status = %item.status, "inventory item created");

        if let Some(athlete_id) = &item.assigned_to {
            self.issue_uniform(athlete_id, &item.item_id).await?;
        }

        Ok(InventoryItemView::new(item, None))
    }

    /// Replace an item's fields, moving the athlete mirror if the assignee changed.
    #[tracing::instrument(name = "inventory.update", skip_all, fields(item_id = %id))]
    pub async fn update(&self, id: &InventoryItemId, input: ItemInput) -> ServiceResult<InventoryItemView> {
        let mut item = self.load_item(id).await?;
        let draft = ItemDraft::parse(input)?;

        let change = AssignmentChange::new(item.assigned_to.clone(), draft.assigned_to.clone());
        let acquired = match change.acquired() {
            Some(athlete_id) => Some(self.require_athlete(athlete_id).await?),
            None => None,
        };

        item.apply_update(draft, Utc::now());
        self.save_item(&item).await?;
        self.sync_athletes(&change, &item.item_id).await?;

        let name = self.assignee_name(&item, acquired).await?;
        Ok(InventoryItemView::new(item, name))
    }

    /// (Re)assign or unassign an item without touching its descriptive fields.
    ///
    /// The item ends up `Checked Out` with an assignee, or `Available` without.
    #[tracing::instrument(name = "inventory.assign", skip_all, fields(item_id = %id))]
    pub async fn assign(
        &self,
        id: &InventoryItemId,
        assigned_to: Option<&str>,
    ) -> ServiceResult<InventoryItemView> {
        let mut item = self.load_item(id).await?;
        ensure_assignable(&item)?;

        let next = normalize_assignee(assigned_to);
        let change = AssignmentChange::new(item.assigned_to.clone(), next.clone());
        let acquired = match change.acquired() {
            Some(athlete_id) => Some(self.require_athlete(athlete_id).await?),
            None => None,
        };

        item.apply_assignment(next, Utc::now());
        self.save_item(&item).await?;
        self.sync_athletes(&change, &item.item_id).await?;

        let name = self.assignee_name(&item, acquired).await?;
        Ok(InventoryItemView::new(item, name))
    }

    /// Delete an item, releasing its assignee first.
    #[tracing::instrument(name = "inventory.delete", skip_all, fields(item_id = %id))]
    pub async fn delete(&self, id: &InventoryItemId) -> ServiceResult<()> {
        let item = self.load_item(id).await?;
        if let Some(athlete_id) = &item.assigned_to {
            self.clear_uniform(athlete_id).await?;
        }

        match self.store.delete(Collection::Inventory, id.as_str()).await {
            Ok(()) => {
                tracing::info!(item_code = %item.item_id, "inventory item deleted");
                Ok(())
            }
            Err(StoreError::NotFound { .. }) => Err(DomainError::not_found(ITEM_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_item(&self, id: &InventoryItemId) -> ServiceResult<InventoryItem> {
        codec::fetch(&self.store, Collection::Inventory, id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found(ITEM_MISSING).into())
    }

    async fn save_item(&self, item: &InventoryItem) -> ServiceResult<()> {
        match codec::save(&self.store, Collection::Inventory, item).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => Err(DomainError::not_found(ITEM_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn require_athlete(&self, id: &AthleteId) -> ServiceResult<Athlete> {
        codec::fetch(&self.store, Collection::Athletes, id.as_str())
            .await?
            .ok_or_else(|| DomainError::missing_reference(ATHLETE_MISSING).into())
    }

    async fn sync_athletes(&self, change: &AssignmentChange, item_code: &str) -> ServiceResult<()> {
        if let Some(previous) = change.released() {
            self.clear_uniform(previous).await?;
        }
        if let Some(next) = change.acquired() {
            self.issue_uniform(next, item_code).await?;
        }
        Ok(())
    }

    async fn issue_uniform(&self, athlete_id: &AthleteId, item_code: &str) -> ServiceResult<()> {
        let status = UniformStatus::issued(item_code);
        match codec::patch(&self.store, Collection::Athletes, athlete_id.as_str(), &status).await {
            Ok(()) => {
                tracing::info!(%athlete_id, item_code, "uniform issued");
                Ok(())
            }
            Err(StoreError::NotFound { .. }) => Err(DomainError::missing_reference(ATHLETE_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// An athlete that no longer exists has nothing to clear.
    async fn clear_uniform(&self, athlete_id: &AthleteId) -> ServiceResult<()> {
        let status = UniformStatus::cleared();
        match codec::patch(&self.store, Collection::Athletes, athlete_id.as_str(), &status).await {
            Ok(()) => {
                tracing::info!(%athlete_id, "uniform cleared");
                Ok(())
            }
            Err(StoreError::NotFound { .. }) => {
                tracing::warn!(%athlete_id, "previous assignee no longer exists; skipping clear");
                Ok(())
            }
            Err(e) => Err(ServiceError::Dependency(e)),
        }
    }

    async fn assignee_name(&self, item: &InventoryItem, fetched: Option<Athlete>) -> ServiceResult<Option<String>> {
        if let Some(athlete) = fetched {
            return Ok(Some(athlete.name()));
        }
        match &item.assigned_to {
            Some(athlete_id) => Ok(athlete_name(&self.store, athlete_id).await?),
            None => Ok(None),
        }
    }
}
