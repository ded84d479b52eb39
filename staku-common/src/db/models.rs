//! Participant row models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted race participant (a row of the `runners` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Runner {
    /// Assigned by storage, never reused
    pub id: i64,
    pub bib: String,
    pub name: String,
    /// Overall rank, 0 when unranked
    pub position: i64,
    pub branch_position: i64,
    pub category_position: i64,
    pub laps: i64,
    /// Accumulated distance exactly as it appeared in the spreadsheet
    pub distance: String,
    pub mode: String,
    pub category: String,
    pub branch: String,
    pub club: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A participant row produced by ingestion, not yet persisted
///
/// Text fields are never absent: missing cells become empty strings and
/// missing or malformed numbers become 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRunner {
    pub bib: String,
    pub name: String,
    pub position: i64,
    pub branch_position: i64,
    pub category_position: i64,
    pub laps: i64,
    pub distance: String,
    pub mode: String,
    pub category: String,
    pub branch: String,
    pub club: String,
}
