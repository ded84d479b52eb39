//! staku-results library - race results service
//!
//! Administrators upload a results spreadsheet which is parsed and appended
//! to the `runners` table; the public reads ranked listings back.

use axum::Router;
use sqlx::SqlitePool;
use staku_common::config::{ServiceConfig, DEFAULT_MAX_UPLOAD_BYTES};
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod error;
pub mod filter;
pub mod ingest;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Staging directory for uploads being parsed
    pub upload_dir: PathBuf,
    /// Insert each upload in one transaction
    pub atomic_uploads: bool,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state with default upload settings
    pub fn new(db: SqlitePool, upload_dir: PathBuf) -> Self {
        Self {
            db,
            upload_dir,
            atomic_uploads: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn from_config(db: SqlitePool, config: &ServiceConfig) -> Self {
        Self {
            db,
            upload_dir: config.upload_dir(),
            atomic_uploads: config.atomic_uploads,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn with_atomic_uploads(mut self, atomic: bool) -> Self {
        self.atomic_uploads = atomic;
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

/// Build application router
///
/// Any browser origin may call the API; there is no authentication layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::admin_routes(state.max_upload_bytes))
        .merge(api::data_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
