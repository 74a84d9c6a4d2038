//! Practice/meet schedule maintenance.

use chrono::Utc;

use trackhub_core::{DomainError, ScheduleEventId};
use trackhub_schedule::{ScheduleEvent, ScheduleEventDraft, ScheduleEventInput};

use crate::error::ServiceResult;
use crate::store::{Collection, DocumentStore, StoreError, codec};

const EVENT_MISSING: &str = "event not found";

#[derive(Debug, Clone)]
pub struct ScheduleService<S> {
    store: S,
}

impl<S: DocumentStore> ScheduleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All entries in calendar order.
    pub async fn list(&self) -> ServiceResult<Vec<ScheduleEvent>> {
        let mut events: Vec<ScheduleEvent> = codec::fetch_all(&self.store, Collection::Events, None).await?;
        events.sort_by(ScheduleEvent::chronological);
        Ok(events)
    }

    pub async fn get(&self, id: &ScheduleEventId) -> ServiceResult<ScheduleEvent> {
        codec::fetch(&self.store, Collection::Events, id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found(EVENT_MISSING).into())
    }

    #[tracing::instrument(name = "events.create", skip_all)]
    pub async fn create(&self, input: ScheduleEventInput) -> ServiceResult<ScheduleEvent> {
        let draft = ScheduleEventDraft::parse(input)?;
        let new = ScheduleEvent::create(draft, Utc::now());
        let id = codec::insert(&self.store, Collection::Events, &new).await?;
        let event = new.into_event(ScheduleEventId::from(id));
        tracing::info!(event_id = %event.id, date = %event.date, "schedule entry created");
        Ok(event)
    }

    #[tracing::instrument(name = "events.update", skip_all, fields(event_id = %id))]
    pub async fn update(&self, id: &ScheduleEventId, input: ScheduleEventInput) -> ServiceResult<ScheduleEvent> {
        let mut event = self.get(id).await?;
        let draft = ScheduleEventDraft::parse(input)?;
        event.apply_update(draft, Utc::now());

        match codec::save(&self.store, Collection::Events, &event).await {
            Ok(()) => Ok(event),
            Err(StoreError::NotFound { .. }) => Err(DomainError::not_found(EVENT_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(name = "events.delete", skip_all, fields(event_id = %id))]
    pub async fn delete(&self, id: &ScheduleEventId) -> ServiceResult<()> {
        match self.store.delete(Collection::Events, id.as_str()).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => Err(DomainError::not_found(EVENT_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }
}
