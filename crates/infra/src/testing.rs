//! Test doubles and fixtures for the service layer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use trackhub_core::AthleteId;
use trackhub_inventory::ItemInput;

use crate::store::{Collection, Document, DocumentStore, Filter, InMemoryDocumentStore, JsonMap, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Update,
    Delete,
}

/// One write seen by a [`RecordingStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOp {
    pub kind: OpKind,
    pub collection: Collection,
    pub id: String,
    pub patch: Option<JsonMap>,
}

/// In-memory store that records every write and can be told to fail updates
/// to one collection.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryDocumentStore,
    writes: Mutex<Vec<WriteOp>>,
    fail_updates_in: Mutex<Option<Collection>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> Vec<WriteOp> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_to(&self, collection: Collection) -> Vec<WriteOp> {
        self.writes()
            .into_iter()
            .filter(|op| op.collection == collection)
            .collect()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    pub fn fail_updates_in(&self, collection: Collection) {
        *self.fail_updates_in.lock().unwrap() = Some(collection);
    }

    fn record(&self, kind: OpKind, collection: Collection, id: &str, patch: Option<JsonMap>) {
        self.writes.lock().unwrap().push(WriteOp {
            kind,
            collection,
            id: id.to_string(),
            patch,
        });
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn list(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.list(collection, filter).await
    }

    async fn add(&self, collection: Collection, data: JsonMap) -> Result<String, StoreError> {
        let id = self.inner.add(collection, data).await?;
        self.record(OpKind::Add, collection, &id, None);
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: &str, patch: JsonMap) -> Result<(), StoreError> {
        if *self.fail_updates_in.lock().unwrap() == Some(collection) {
            return Err(StoreError::Backend(format!("injected failure updating {collection}/{id}")));
        }
        self.inner.update(collection, id, patch.clone()).await?;
        self.record(OpKind::Update, collection, id, Some(patch));
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id).await?;
        self.record(OpKind::Delete, collection, id, None);
        Ok(())
    }
}

/// Store an athlete document directly, bypassing the roster service.
pub async fn seed_athlete<S: DocumentStore + ?Sized>(store: &S, first: &str, last: &str) -> AthleteId {
    let data = object(json!({
        "firstName": first,
        "lastName": last,
        "groupId": 1,
        "hasUniform": false,
        "uniformId": null,
    }));
    AthleteId::from(store.add(Collection::Athletes, data).await.unwrap())
}

pub fn object(value: serde_json::Value) -> JsonMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn item_input(item_id: &str, status: &str, assigned_to: Option<&str>) -> ItemInput {
    ItemInput {
        item_id: Some(item_id.to_string()),
        item_type: Some("Singlet".to_string()),
        status: Some(status.to_string()),
        assigned_to: assigned_to.map(str::to_string),
        ..ItemInput::default()
    }
}
