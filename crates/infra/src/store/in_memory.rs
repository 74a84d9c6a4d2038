use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, JsonMap, StoreError};

/// In-memory document store for tests/dev.
///
/// Each collection is kept as a vector so listing preserves insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Collection, Vec<Document>>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Collection, Vec<Document>>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let map = self.read()?;
        Ok(map
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        let map = self.read()?;
        let Some(docs) = map.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|d| filter.is_none_or(|f| f.matches(&d.data)))
            .cloned()
            .collect())
    }

    async fn add(&self, collection: Collection, data: JsonMap) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        let mut map = self.write()?;
        map.entry(collection).or_default().push(Document {
            id: id.clone(),
            data,
        });
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: &str, patch: JsonMap) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let doc = map
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        for (field, value) in patch {
            doc.data.insert(field, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let docs = map
            .get_mut(&collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let pos = docs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        docs.remove(pos);
        Ok(())
    }
}
