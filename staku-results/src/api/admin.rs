//! Administrator endpoints: spreadsheet upload and full wipe
//!
//! No authentication is applied here; deployments that need it put the
//! service behind a proxy.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use staku_common::db::NewRunner;
use tracing::{info, warn};

use super::types::MessageResponse;
use crate::ingest::{IngestError, StagedUpload};
use crate::{db, ApiError, ApiResult, AppState};

/// Multipart field carrying the spreadsheet
pub const FILE_FIELD: &str = "file";

const NO_FILE_MESSAGE: &str = "No se proporcionó ningún archivo";
const TOO_LARGE_MESSAGE: &str = "El archivo excede el tamaño máximo permitido";
const INVALID_FORM_MESSAGE: &str = "Formulario de carga inválido";
const SAVE_FAILED_MESSAGE: &str = "Error guardando los corredores";
const CLEAR_FAILED_MESSAGE: &str = "Error al eliminar los datos";

/// POST /api/admin/upload
///
/// **Request:** multipart form with one `file` field (xlsx, xls, xlsb or ods)
/// **Response:** `{"success": true, "message": "...", "recordsProcessed": n}`
///
/// **Errors:**
/// - 400: no file, unreadable workbook, no sheets, or no data rows
/// - 413: file above the configured upload limit
/// - 500: storage fault (`recordsProcessed` = rows committed before it)
pub async fn upload_results(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let mut multipart = multipart.map_err(|_| ApiError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    let (file_name, bytes) = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_FILE_MESSAGE.to_string()))?;
    info!("Received upload '{}' ({} bytes)", file_name, bytes.len());

    // Parsing is CPU and disk bound
    let upload_dir = state.upload_dir.clone();
    let runners = tokio::task::spawn_blocking(move || -> Result<Vec<NewRunner>, IngestError> {
        StagedUpload::stage(&upload_dir, &file_name, &bytes)?.ingest()
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Ingestion task failed: {}", e)))??;

    let inserted = if state.atomic_uploads {
        db::bulk_insert_atomic(&state.db, &runners).await
    } else {
        db::bulk_insert(&state.db, &runners).await
    }
    .map_err(|source| ApiError::PartialInsert {
        message: SAVE_FAILED_MESSAGE,
        source,
    })?;

    info!("{} runners stored from upload", inserted);

    Ok(Json(
        MessageResponse::ok(format!("{} corredores procesados exitosamente", inserted))
            .with_records(inserted),
    ))
}

/// Pull the `file` field out of the form, skipping any other fields
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<Option<(String, Bytes)>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.xlsx").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some((file_name, bytes)));
    }
    Ok(None)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string())
    } else {
        warn!("Malformed upload form: {}", err.body_text());
        ApiError::BadRequest(INVALID_FORM_MESSAGE.to_string())
    }
}

/// DELETE /api/admin/clear
///
/// Removes every stored runner. Wiping an empty table is a success.
pub async fn clear_results(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let deleted = db::clear_all(&state.db)
        .await
        .map_err(ApiError::storage(CLEAR_FAILED_MESSAGE))?;

    info!("Cleared {} runners", deleted);

    Ok(Json(MessageResponse::ok("Todos los datos fueron eliminados")))
}

/// Build admin routes with the upload body limit applied
pub fn admin_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/admin/upload", post(upload_results))
        .route("/api/admin/clear", delete(clear_results))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
