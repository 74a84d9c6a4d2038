//! Typed access on top of [`DocumentStore`].
//!
//! Models carry their `id` as a regular field; on the way in it is stripped
//! (the store owns ids), on the way out it is put back before deserializing.

use serde::Serialize;
use trackhub_core::Entity;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::{Collection, Document, DocumentStore, Filter, JsonMap, StoreError};

/// Serialize a model (or partial model) into document fields, minus `id`.
pub fn encode<T: Serialize>(value: &T) -> Result<JsonMap, StoreError> {
    match serde_json::to_value(value).map_err(|e| StoreError::Encode(e.to_string()))? {
        JsonValue::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(StoreError::Encode(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Deserialize a stored document into a model, re-inserting its id.
pub fn decode<T: DeserializeOwned>(collection: Collection, doc: Document) -> Result<T, StoreError> {
    let Document { id, mut data } = doc;
    data.insert("id".to_string(), JsonValue::String(id.clone()));
    serde_json::from_value(JsonValue::Object(data)).map_err(|e| StoreError::Decode {
        collection,
        id,
        message: e.to_string(),
    })
}

pub async fn fetch<S, T>(store: &S, collection: Collection, id: &str) -> Result<Option<T>, StoreError>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .get(collection, id)
        .await?
        .map(|doc| decode(collection, doc))
        .transpose()
}

pub async fn fetch_all<S, T>(
    store: &S,
    collection: Collection,
    filter: Option<&Filter>,
) -> Result<Vec<T>, StoreError>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .list(collection, filter)
        .await?
        .into_iter()
        .map(|doc| decode(collection, doc))
        .collect()
}

pub async fn insert<S, T>(store: &S, collection: Collection, value: &T) -> Result<String, StoreError>
where
    S: DocumentStore + ?Sized,
    T: Serialize,
{
    store.add(collection, encode(value)?).await
}

pub async fn patch<S, T>(store: &S, collection: Collection, id: &str, value: &T) -> Result<(), StoreError>
where
    S: DocumentStore + ?Sized,
    T: Serialize,
{
    store.update(collection, id, encode(value)?).await
}

/// Write every field of an already-stored entity back under its own id.
pub async fn save<S, T>(store: &S, collection: Collection, entity: &T) -> Result<(), StoreError>
where
    S: DocumentStore + ?Sized,
    T: Entity + Serialize,
{
    patch(store, collection, entity.id().as_ref(), entity).await
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
