//! Typed errors and HTTP mapping.

use crate::response::error_body;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown table")]
    UnknownTable,
    #[error("record not found")]
    RecordNotFound,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    /// Driver error; the message goes to the caller unchanged.
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0} operation not implemented for this table")]
    NotImplemented(Method),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownTable | AppError::RecordNotFound | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::UnknownTable | AppError::RecordNotFound | AppError::NotFound | AppError::Validation(_) => {
                (status, Json(error_body(self.to_string()))).into_response()
            }
            AppError::Db(_) | AppError::Timeout(_) => {
                tracing::warn!(error = %self, "request failed");
                (status, self.to_string()).into_response()
            }
            AppError::NotImplemented(_) | AppError::MethodNotAllowed => (status, self.to_string()).into_response(),
        }
    }
}
