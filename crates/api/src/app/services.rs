//! Store selection and service wiring shared by every handler.

use std::sync::Arc;

use trackhub_infra::{
    AssignmentEngine, AthleteService, DocumentStore, InMemoryDocumentStore, ReadModel, ScheduleService,
};

use crate::config::StoreBackend;

pub type SharedStore = Arc<dyn DocumentStore>;

/// Services handed to handlers through an `Extension`.
pub struct AppServices {
    pub inventory: AssignmentEngine<SharedStore>,
    pub reads: ReadModel<SharedStore>,
    pub athletes: AthleteService<SharedStore>,
    pub schedule: ScheduleService<SharedStore>,
}

impl AppServices {
    pub fn new(store: SharedStore) -> Self {
        Self {
            inventory: AssignmentEngine::new(store.clone()),
            reads: ReadModel::new(store.clone()),
            athletes: AthleteService::new(store.clone()),
            schedule: ScheduleService::new(store),
        }
    }
}

pub async fn build_services(backend: &StoreBackend) -> anyhow::Result<AppServices> {
    let store = open_store(backend).await?;
    Ok(AppServices::new(store))
}

#[cfg(feature = "postgres")]
async fn open_store(backend: &StoreBackend) -> anyhow::Result<SharedStore> {
    use anyhow::Context;
    use trackhub_infra::PostgresDocumentStore;

    match backend {
        StoreBackend::InMemory => {
            tracing::warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Postgres { url } => {
            let store = PostgresDocumentStore::connect(url, 10)
                .await
                .context("failed to connect to DATABASE_URL")?;
            store
                .ensure_schema()
                .await
                .context("failed to create the documents table")?;
            tracing::info!("using postgres document store");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(backend: &StoreBackend) -> anyhow::Result<SharedStore> {
    if let StoreBackend::Postgres { .. } = backend {
        tracing::warn!("DATABASE_URL is set but postgres support is not compiled in; using the in-memory store");
    } else {
        tracing::warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
    }
    Ok(Arc::new(InMemoryDocumentStore::new()))
}
