//! Document store abstraction.
//!
//! The club's data lives in schemaless JSON documents grouped into
//! collections. Backends only need the five operations below; everything
//! typed sits on top in [`codec`].
//!
//! There are no multi-document transactions. Services issue their reads and
//! writes one at a time.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod codec;
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDocumentStore;

/// Top-level fields of a document.
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Named document collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Athletes,
    Inventory,
    Events,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Athletes => "athletes",
            Collection::Inventory => "inventory",
            Collection::Events => "events",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: its id plus its fields (the id is not repeated inside `data`).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: JsonMap,
}

/// Equality filter on a top-level field.
///
/// A document without the field does not match, even when filtering for `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: JsonValue,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &JsonMap) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: Collection, id: String },

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("failed to decode {collection}/{id}: {message}")]
    Decode {
        collection: Collection,
        id: String,
        message: String,
    },

    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}

/// Per-collection document operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document; `None` when it does not exist.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    /// All documents of a collection (optionally filtered), in insertion order.
    async fn list(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Insert a new document and return the id the store assigned to it.
    async fn add(&self, collection: Collection, data: JsonMap) -> Result<String, StoreError>;

    /// Shallow-merge `patch` into an existing document.
    ///
    /// Fields absent from `patch` are left alone; a `null` value stores null.
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: Collection, id: &str, patch: JsonMap) -> Result<(), StoreError>;

    /// Remove a document. Fails with [`StoreError::NotFound`] if it does not exist.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get(collection, id).await
    }

    async fn list(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).list(collection, filter).await
    }

    async fn add(&self, collection: Collection, data: JsonMap) -> Result<String, StoreError> {
        (**self).add(collection, data).await
    }

    async fn update(&self, collection: Collection, id: &str, patch: JsonMap) -> Result<(), StoreError> {
        (**self).update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        (**self).delete(collection, id).await
    }
}
