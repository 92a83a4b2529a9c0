//! Standard response envelope helpers: `{"response": ...}` on success, `{"error": ...}` on failure.

use crate::value::Row;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TablesBody {
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct RecordsBody {
    pub records: Vec<Row>,
}

#[derive(Serialize)]
pub struct RecordBody {
    pub record: Row,
}

#[derive(Serialize)]
pub struct IdBody {
    pub id: serde_json::Value,
}

pub fn success<T: Serialize>(response: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { response }))
}

pub fn error_body(message: String) -> serde_json::Value {
    serde_json::json!({ "error": message })
}
