//! Database initialization
//!
//! Opens (or creates) the SQLite database and makes sure the `runners`
//! table and its indices exist. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Name of the participant table
pub const RUNNERS_TABLE: &str = "runners";

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the listing page read while an upload is inserting
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_runners_table(&pool).await?;

    Ok(pool)
}

/// Create the runners table and its lookup indices
///
/// AUTOINCREMENT keeps ids from being reused after a full wipe.
pub async fn create_runners_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS runners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bib TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL DEFAULT '',
            position INTEGER NOT NULL DEFAULT 0,
            branch_position INTEGER NOT NULL DEFAULT 0,
            category_position INTEGER NOT NULL DEFAULT 0,
            laps INTEGER NOT NULL DEFAULT 0,
            distance TEXT NOT NULL DEFAULT '',
            mode TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            branch TEXT NOT NULL DEFAULT '',
            club TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_runners_position ON runners(position)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_runners_category ON runners(category, category_position)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
