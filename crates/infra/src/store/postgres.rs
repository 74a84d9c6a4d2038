//! Postgres-backed document store.
//!
//! All collections share one JSONB table:
//!
//! ```text
//! documents(collection TEXT, id TEXT, seq BIGSERIAL, data JSONB, PRIMARY KEY (collection, id))
//! ```
//!
//! `seq` gives listing its insertion order. Filters use JSONB containment
//! (`data @> {"field": value}`), patches use JSONB concatenation
//! (`data || patch`), which is the same shallow merge the in-memory store does.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, JsonMap, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    seq BIGSERIAL,
    data JSONB NOT NULL,
    PRIMARY KEY (collection, id)
)
"#;

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        StoreError::Backend(value.to_string())
    }
}

pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `documents` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<Document, StoreError> {
        let id: String = row.try_get("id")?;
        let Json(data): Json<JsonMap> = row.try_get("data")?;
        Ok(Document { id, data })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn list(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        let containment = filter.map(|f| {
            let mut map = JsonMap::new();
            map.insert(f.field.clone(), f.value.clone());
            Json(JsonValue::Object(map))
        });

        let rows = sqlx::query(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1
              AND ($2::jsonb IS NULL OR data @> $2::jsonb)
            ORDER BY seq
            "#,
        )
        .bind(collection.as_str())
        .bind(containment)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn add(&self, collection: Collection, data: JsonMap) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(&id)
            .bind(Json(JsonValue::Object(data)))
            .execute(&self.pool)
            .await?;

        tracing::debug!(%collection, %id, "document inserted");
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: &str, patch: JsonMap) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(JsonValue::Object(patch)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }
}
