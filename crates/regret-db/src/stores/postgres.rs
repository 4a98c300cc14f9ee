//! PostgreSQL implementation of DocumentStore
//!
//! All collections share the `documents` table. Fields live in a JSONB
//! `data` column, so filters and sort keys are expressed as `data -> field`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use regret_core::{
    Collection, Document, DocumentList, DocumentStore, Fields, Filter, ListQuery, RepoResult,
    Sort, SortDirection, SortField,
};

use crate::models::DocumentModel;

use super::error::{document_not_found, duplicate_document, map_db_error, map_unique_violation};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT        NOT NULL,
    id          TEXT        NOT NULL,
    data        JSONB       NOT NULL DEFAULT '{}'::jsonb,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection, id)
);
CREATE INDEX IF NOT EXISTS idx_documents_collection_created
    ON documents (collection, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_documents_data
    ON documents USING GIN (data jsonb_path_ops);
";

/// PostgreSQL implementation of DocumentStore
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the documents table and its indexes if they are missing
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for filter in filters {
        match filter {
            Filter::Equal(field, value) => {
                builder.push(" AND data -> ");
                builder.push_bind(field.clone());
                builder.push(" = ");
                builder.push_bind(Json(value.clone()));
            }
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: Option<&Sort>) {
    let Some(sort) = sort else {
        builder.push(" ORDER BY created_at ASC, id ASC");
        return;
    };

    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };

    match &sort.field {
        SortField::CreatedAt => {
            builder.push(format!(" ORDER BY created_at {direction}, id ASC"));
        }
        SortField::Field(name) => {
            builder.push(" ORDER BY data -> ");
            builder.push_bind(name.clone());
            builder.push(format!(" {direction} NULLS LAST, created_at DESC, id ASC"));
        }
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self))]
    async fn list(&self, collection: Collection, query: &ListQuery) -> RepoResult<DocumentList> {
        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        count.push_bind(collection.as_str());
        push_filters(&mut count, &query.filters);

        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT collection, id, data, created_at, updated_at FROM documents WHERE collection = ",
        );
        select.push_bind(collection.as_str());
        push_filters(&mut select, &query.filters);
        push_order(&mut select, query.sort.as_ref());
        select.push(" LIMIT ");
        select.push_bind(to_i64(query.limit));
        select.push(" OFFSET ");
        select.push_bind(to_i64(query.offset));

        let rows = select
            .build_query_as::<DocumentModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(total, returned = rows.len(), "Listed documents");

        Ok(DocumentList {
            total: u64::try_from(total).unwrap_or(0),
            documents: rows.into_iter().map(Document::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: Collection, id: &str) -> RepoResult<Option<Document>> {
        let result = sqlx::query_as::<_, DocumentModel>(
            r"
            SELECT collection, id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Document::from))
    }

    #[instrument(skip(self, fields))]
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> RepoResult<Document> {
        let row = sqlx::query_as::<_, DocumentModel>(
            r"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING collection, id, data, created_at, updated_at
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(fields))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || duplicate_document(collection, id)))?;

        Ok(Document::from(row))
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> RepoResult<Document> {
        let row = sqlx::query_as::<_, DocumentModel>(
            r"
            UPDATE documents
            SET data = data || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING collection, id, data, created_at, updated_at
            ",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(fields))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Document::from)
            .ok_or_else(|| document_not_found(collection, id))
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
