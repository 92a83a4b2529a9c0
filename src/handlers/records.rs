//! Record-level handlers for `/{table}/{id}`.

use super::bounded;
use crate::error::AppError;
use crate::response::{success, RecordBody};
use crate::sql::ID_COLUMN;
use crate::state::AppState;
use axum::http::Method;
use axum::response::{IntoResponse, Response};

/// GET /{table}/{id}: columns are fetched only to type the key; the row decodes from its own result.
pub async fn get_record(state: &AppState, table: &str, id: &str) -> Result<Response, AppError> {
    let columns = bounded(
        state.limits.query_timeout,
        state.catalog.columns_of(state.store.as_ref(), table),
    )
    .await?;
    let id_column = columns.iter().find(|c| c.name == ID_COLUMN);
    let record = bounded(state.limits.query_timeout, state.store.select_by_id(table, id_column, id))
        .await?
        .ok_or(AppError::RecordNotFound)?;
    Ok(success(RecordBody { record }).into_response())
}

/// Not supported; never touches the database.
pub fn create_record() -> Result<Response, AppError> {
    Err(AppError::NotImplemented(Method::POST))
}

/// Not supported; never touches the database.
pub fn delete_record() -> Result<Response, AppError> {
    Err(AppError::NotImplemented(Method::DELETE))
}
