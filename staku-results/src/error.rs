//! Error types for staku-results
//!
//! Every handler failure ends up here and is rendered as the standard
//! envelope `{"success": false, "message": ...}`. Storage faults are logged
//! with full detail; the client only sees a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::types::MessageResponse;
use crate::db::BulkInsertError;
use crate::ingest::IngestError;

/// Generic message for faults the client cannot act on
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Upload larger than the configured limit (413)
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Spreadsheet rejected as a whole
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Database fault; `message` is what the client sees
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: staku_common::Error,
    },

    /// Bulk insert stopped part way
    #[error("{message}: {source}")]
    PartialInsert {
        message: &'static str,
        #[source]
        source: BulkInsertError,
    },

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Adapter for `map_err` on storage calls
    pub fn storage(message: &'static str) -> impl FnOnce(staku_common::Error) -> Self {
        move |source| ApiError::Storage { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, MessageResponse::failure(msg)),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, MessageResponse::failure(msg))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, MessageResponse::failure(msg)),
            ApiError::Ingest(err) => {
                let status = match &err {
                    IngestError::Io(e) => {
                        error!("Upload staging failed: {}", e);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    IngestError::InvalidWorkbook(e) | IngestError::UnreadableSheet(e) => {
                        warn!("Rejected upload: {}: {}", err, e);
                        StatusCode::BAD_REQUEST
                    }
                    IngestError::EmptyWorkbook | IngestError::EmptyContent => {
                        info!("Rejected upload: {}", err);
                        StatusCode::BAD_REQUEST
                    }
                };
                (status, MessageResponse::failure(err.to_string()))
            }
            ApiError::Storage { message, source } => {
                error!("{}: {}", message, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::failure(message),
                )
            }
            ApiError::PartialInsert { message, source } => {
                error!("{}: {}", message, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::failure(message).with_records(source.committed),
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::failure(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
