//! Database operations for the `history_entries` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `history_entries` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct HistoryEntryRow {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    /// Serialized task result; opaque to the database layer.
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

/// Insert a history entry and return the stored row.
///
/// Generates the UUID in Rust.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_history_entry(
    pool: &PgPool,
    category: &str,
    title: &str,
    payload: Value,
) -> Result<HistoryEntryRow, DbError> {
    let row = sqlx::query_as::<_, HistoryEntryRow>(
        "INSERT INTO history_entries (id, category, title, payload) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, category, title, payload, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(category)
    .bind(title)
    .bind(payload)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List recent history entries, newest first, optionally filtered by category.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_history_entries(
    pool: &PgPool,
    category: Option<&str>,
    limit: i64,
) -> Result<Vec<HistoryEntryRow>, DbError> {
    let rows = match category {
        Some(category) => {
            sqlx::query_as::<_, HistoryEntryRow>(
                "SELECT id, category, title, payload, created_at \
                 FROM history_entries \
                 WHERE category = $1 \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $2",
            )
            .bind(category)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, HistoryEntryRow>(
                "SELECT id, category, title, payload, created_at \
                 FROM history_entries \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Delete a history entry by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the id does not exist, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_history_entry(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM history_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
