//! Test helper utilities shared by staku-results integration tests
#![allow(dead_code)]

pub mod xlsx;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use staku_common::db::init_database;
use staku_results::{build_router, AppState};
use tempfile::TempDir;

pub const BOUNDARY: &str = "----stakutestboundary";

/// Full header row in sheet order
pub const HEADERS: [&str; 11] = [
    "Bib",
    "Competidor",
    "Posición",
    "Posición Rama",
    "Posición Categoría",
    "Laps",
    "Distancia acumulada",
    "Modalidad",
    "Categoria",
    "Rama",
    "Club",
];

/// Fresh database under a temp root; keep the TempDir alive for the test
pub async fn create_test_state() -> (TempDir, AppState) {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("staku.db")).await.unwrap();
    let state = AppState::new(pool, temp_dir.path().join("uploads"));
    (temp_dir, state)
}

pub async fn create_test_app() -> (TempDir, Router, SqlitePool) {
    let (temp_dir, state) = create_test_state().await;
    let pool = state.db.clone();
    (temp_dir, build_router(state), pool)
}

/// multipart/form-data body with a single file part
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        b"Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n",
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /api/admin/upload with `bytes` as the `file` field
pub fn upload_request(file_name: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/admin/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body("file", file_name, bytes)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
