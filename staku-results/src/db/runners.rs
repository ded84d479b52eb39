//! Participant persistence and queries
//!
//! Writes append only: rows are never updated or deduplicated by bib, and the
//! only removal is the full wipe.

use sqlx::sqlite::SqliteArguments;
use sqlx::{query::Query, Sqlite, SqlitePool};
use staku_common::db::{NewRunner, Runner};
use staku_common::Result;
use thiserror::Error;

/// A bulk insert that stopped part way
///
/// `committed` rows are already visible in the table.
#[derive(Debug, Error)]
#[error("insert failed after {committed} committed rows: {source}")]
pub struct BulkInsertError {
    pub committed: u64,
    #[source]
    pub source: sqlx::Error,
}

fn insert_runner(runner: &NewRunner) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(
        r#"
        INSERT INTO runners
            (bib, name, position, branch_position, category_position, laps,
             distance, mode, category, branch, club, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(runner.bib.as_str())
    .bind(runner.name.as_str())
    .bind(runner.position)
    .bind(runner.branch_position)
    .bind(runner.category_position)
    .bind(runner.laps)
    .bind(runner.distance.as_str())
    .bind(runner.mode.as_str())
    .bind(runner.category.as_str())
    .bind(runner.branch.as_str())
    .bind(runner.club.as_str())
}

/// Append rows one at a time, each committed on its own
///
/// Stops at the first failure; the error reports how many rows were
/// committed before it.
pub async fn bulk_insert(
    pool: &SqlitePool,
    runners: &[NewRunner],
) -> std::result::Result<u64, BulkInsertError> {
    let mut committed = 0;
    for runner in runners {
        insert_runner(runner)
            .execute(pool)
            .await
            .map_err(|source| BulkInsertError { committed, source })?;
        committed += 1;
    }
    Ok(committed)
}

/// Append all rows in a single transaction
///
/// Either every row is committed or none is (`committed` is then 0).
pub async fn bulk_insert_atomic(
    pool: &SqlitePool,
    runners: &[NewRunner],
) -> std::result::Result<u64, BulkInsertError> {
    let rolled_back = |source: sqlx::Error| BulkInsertError {
        committed: 0,
        source,
    };

    let mut tx = pool.begin().await.map_err(rolled_back)?;
    for runner in runners {
        insert_runner(runner)
            .execute(&mut *tx)
            .await
            .map_err(rolled_back)?;
    }
    tx.commit().await.map_err(rolled_back)?;

    Ok(runners.len() as u64)
}

/// Delete every row; returns how many were removed (0 is still success)
pub async fn clear_all(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM runners").execute(pool).await?;
    Ok(result.rows_affected())
}

/// All rows by overall position (0 = unranked sorts first), then insertion order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Runner>> {
    let runners = sqlx::query_as::<_, Runner>(
        r#"
        SELECT id, bib, name, position, branch_position, category_position, laps,
               distance, mode, category, branch, club, created_at, updated_at
        FROM runners
        ORDER BY position ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(runners)
}

/// Load one row by id
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Runner>> {
    let runner = sqlx::query_as::<_, Runner>(
        r#"
        SELECT id, bib, name, position, branch_position, category_position, laps,
               distance, mode, category, branch, club, created_at, updated_at
        FROM runners
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(runner)
}

/// Rows whose category equals `category` exactly, by category position
pub async fn list_by_category(pool: &SqlitePool, category: &str) -> Result<Vec<Runner>> {
    let runners = sqlx::query_as::<_, Runner>(
        r#"
        SELECT id, bib, name, position, branch_position, category_position, laps,
               distance, mode, category, branch, club, created_at, updated_at
        FROM runners
        WHERE category = ?
        ORDER BY category_position ASC, id ASC
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(runners)
}

/// Count stored rows
pub async fn count_all(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM runners")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
