//! Database operations for the `config_options` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `config_options` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ConfigOptionRow {
    pub category: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Insert or replace the option at `(category, key)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_config_option(
    pool: &PgPool,
    category: &str,
    key: &str,
    value: &str,
) -> Result<ConfigOptionRow, DbError> {
    let row = sqlx::query_as::<_, ConfigOptionRow>(
        "INSERT INTO config_options (category, key, value) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (category, key) DO UPDATE \
             SET value = EXCLUDED.value, updated_at = now() \
         RETURNING category, key, value, updated_at",
    )
    .bind(category)
    .bind(key)
    .bind(value)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List every option in a category, ordered by key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_config_options(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<ConfigOptionRow>, DbError> {
    let rows = sqlx::query_as::<_, ConfigOptionRow>(
        "SELECT category, key, value, updated_at \
         FROM config_options \
         WHERE category = $1 \
         ORDER BY key",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Delete the option at `(category, key)`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such option exists, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_config_option(pool: &PgPool, category: &str, key: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM config_options WHERE category = $1 AND key = $2")
        .bind(category)
        .bind(key)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
