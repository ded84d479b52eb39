//! Public read endpoints over stored results

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use staku_common::db::Runner;
use tracing::debug;

use super::types::{FacetsResponse, ItemResponse, ListResponse};
use crate::filter::{self, RunnerFilter};
use crate::{db, ApiError, ApiResult, AppState};

const NOT_FOUND_MESSAGE: &str = "Corredor no encontrado";

/// GET /api/data
///
/// All runners by overall position. Optional `search`, `category` and
/// `branch` query parameters narrow the list; `count` reflects the result.
pub async fn list_runners(
    State(state): State<AppState>,
    Query(filter): Query<RunnerFilter>,
) -> ApiResult<Json<ListResponse<Runner>>> {
    let runners = db::list_all(&state.db)
        .await
        .map_err(ApiError::storage("Error al obtener los datos"))?;

    let runners = filter.apply(runners);
    debug!("Listing {} runners (filter: {:?})", runners.len(), filter);

    Ok(Json(ListResponse::new(runners)))
}

/// GET /api/data/facets
pub async fn runner_facets(State(state): State<AppState>) -> ApiResult<Json<FacetsResponse>> {
    let runners = db::list_all(&state.db)
        .await
        .map_err(ApiError::storage("Error al obtener los datos"))?;

    Ok(Json(FacetsResponse {
        success: true,
        facets: filter::facets(&runners),
    }))
}

/// GET /api/data/:id
///
/// Ids that are not integers cannot exist and answer 404 like unknown ones.
pub async fn get_runner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemResponse<Runner>>> {
    let not_found = || ApiError::NotFound(NOT_FOUND_MESSAGE.to_string());

    let id: i64 = id.trim().parse().map_err(|_| not_found())?;
    let runner = db::get_by_id(&state.db, id)
        .await
        .map_err(ApiError::storage("Error al obtener el corredor"))?
        .ok_or_else(not_found)?;

    Ok(Json(ItemResponse::new(runner)))
}

/// GET /api/data/category/:category
///
/// Exact, case-sensitive match ordered by category position. An unknown
/// category is an empty list, not an error.
pub async fn runners_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<ListResponse<Runner>>> {
    let runners = db::list_by_category(&state.db, &category)
        .await
        .map_err(ApiError::storage("Error al obtener los corredores"))?;

    Ok(Json(ListResponse::new(runners)))
}

/// Build data routes
///
/// `/api/data/facets` is a static segment and takes precedence over `:id`.
pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/api/data", get(list_runners))
        .route("/api/data/facets", get(runner_facets))
        .route("/api/data/:id", get(get_runner))
        .route("/api/data/category/:category", get(runners_by_category))
}
