//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::{db, AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Stored runner count; absent when the database did not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runners: Option<i64>,
}

/// GET /health
///
/// Always 200; `status` is "degraded" when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let runners = match db::count_all(&state.db).await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Health check could not count runners: {}", e);
            None
        }
    };

    Json(HealthResponse {
        status: if runners.is_some() { "ok" } else { "degraded" }.to_string(),
        module: "staku-results".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        runners,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
