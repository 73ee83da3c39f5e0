//! Database operations for the `knowledge_snippets` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `knowledge_snippets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct KnowledgeSnippetRow {
    pub id: Uuid,
    pub category: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a snippet and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_knowledge_snippet(
    pool: &PgPool,
    category: &str,
    content: &str,
) -> Result<KnowledgeSnippetRow, DbError> {
    let row = sqlx::query_as::<_, KnowledgeSnippetRow>(
        "INSERT INTO knowledge_snippets (id, category, content) \
         VALUES ($1, $2, $3) \
         RETURNING id, category, content, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(category)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List snippets in a category, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_knowledge_snippets(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<KnowledgeSnippetRow>, DbError> {
    let rows = sqlx::query_as::<_, KnowledgeSnippetRow>(
        "SELECT id, category, content, created_at \
         FROM knowledge_snippets \
         WHERE category = $1 \
         ORDER BY created_at, id",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Delete a snippet by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the id does not exist, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_knowledge_snippet(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM knowledge_snippets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
