//! Athlete roster maintenance (names and groups).
//!
//! Roster edits write only `firstName`, `lastName` and `groupId`. The
//! uniform mirror belongs to [`crate::AssignmentEngine`].

use trackhub_core::{AthleteId, DomainError};
use trackhub_roster::{Athlete, AthleteDraft, AthleteInput};

use crate::error::ServiceResult;
use crate::store::{Collection, DocumentStore, Filter, StoreError, codec};

const ATHLETE_MISSING: &str = "athlete not found";

#[derive(Debug, Clone)]
pub struct AthleteService<S> {
    store: S,
}

impl<S: DocumentStore> AthleteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "athletes.create", skip_all)]
    pub async fn create(&self, input: AthleteInput) -> ServiceResult<Athlete> {
        let draft = AthleteDraft::parse(input)?;
        let new = Athlete::create(draft);
        let id = codec::insert(&self.store, Collection::Athletes, &new).await?;
        let athlete = new.into_athlete(AthleteId::from(id));
        tracing::info!(athlete_id = %athlete.id, group_id = athlete.group_id, "athlete created");
        Ok(athlete)
    }

    #[tracing::instrument(name = "athletes.update", skip_all, fields(athlete_id = %id))]
    pub async fn update(&self, id: &AthleteId, input: AthleteInput) -> ServiceResult<Athlete> {
        let mut athlete = self.load(id).await?;
        let draft = AthleteDraft::parse(input)?;

        match codec::patch(&self.store, Collection::Athletes, id.as_str(), &draft).await {
            Ok(()) => {}
            Err(StoreError::NotFound { .. }) => return Err(DomainError::not_found(ATHLETE_MISSING).into()),
            Err(e) => return Err(e.into()),
        }

        athlete.first_name = draft.first_name;
        athlete.last_name = draft.last_name;
        athlete.group_id = draft.group_id;
        Ok(athlete)
    }

    /// Refuses while any item still points at the athlete, so no item is left
    /// checked out to nobody.
    #[tracing::instrument(name = "athletes.delete", skip_all, fields(athlete_id = %id))]
    pub async fn delete(&self, id: &AthleteId) -> ServiceResult<()> {
        self.load(id).await?;

        let filter = Filter::eq("assignedTo", id.as_str());
        let held = self.store.list(Collection::Inventory, Some(&filter)).await?;
        if !held.is_empty() {
            return Err(DomainError::validation(format!(
                "athlete still has {} assigned item(s); unassign them first",
                held.len()
            ))
            .into());
        }

        match self.store.delete(Collection::Athletes, id.as_str()).await {
            Ok(()) => {
                tracing::info!("athlete deleted");
                Ok(())
            }
            Err(StoreError::NotFound { .. }) => Err(DomainError::not_found(ATHLETE_MISSING).into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn load(&self, id: &AthleteId) -> ServiceResult<Athlete> {
        codec::fetch(&self.store, Collection::Athletes, id.as_str())
            .await?
            .ok_or_else(|| DomainError::not_found(ATHLETE_MISSING).into())
    }
}
