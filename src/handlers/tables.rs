//! Table-level handlers: list tables, list records, update a record by id.

use super::bounded;
use crate::catalog::ColumnInfo;
use crate::error::AppError;
use crate::response::{success, IdBody, RecordsBody, TablesBody};
use crate::sql::ID_COLUMN;
use crate::state::AppState;
use crate::store::{Page, RowUpdate, DEFAULT_LIMIT};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::collections::HashMap;

pub fn list_tables(state: &AppState) -> Response {
    success(TablesBody {
        tables: state.catalog.sorted_names(),
    })
    .into_response()
}

/// `limit`/`offset` from the query string; absent or empty keeps the default.
pub fn parse_page(params: &HashMap<String, String>) -> Result<Page, AppError> {
    fn parse(params: &HashMap<String, String>, key: &str, default: u32) -> Result<u32, AppError> {
        match params.get(key).map(|v| v.trim()) {
            None | Some("") => Ok(default),
            Some(v) => v.parse().map_err(|_| AppError::Validation(format!("invalid {}", key))),
        }
    }
    Ok(Page {
        limit: parse(params, "limit", DEFAULT_LIMIT)?,
        offset: parse(params, "offset", 0)?,
    })
}

pub async fn list_records(state: &AppState, table: &str, params: &HashMap<String, String>) -> Result<Response, AppError> {
    let page = parse_page(params)?;
    let records = bounded(Some(state.limits.list_timeout), state.store.select_page(table, page)).await?;
    Ok(success(RecordsBody { records }).into_response())
}

/// PUT /{table}: body is a JSON object with `id` plus the columns to set.
pub async fn update_record(state: &AppState, table: &str, body: &[u8]) -> Result<Response, AppError> {
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(m)) => m,
        _ => return Err(AppError::Validation("Invalid JSON".into())),
    };
    let id = fields
        .get(ID_COLUMN)
        .cloned()
        .ok_or_else(|| AppError::Validation("Missing 'id' field".into()))?;

    let columns = bounded(
        state.limits.query_timeout,
        state.catalog.columns_of(state.store.as_ref(), table),
    )
    .await?;
    let by_name: HashMap<&str, &ColumnInfo> = columns.iter().map(|c| (c.name.as_str(), c)).collect();

    let mut assignments = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        if name == ID_COLUMN {
            continue;
        }
        let Some(column) = by_name.get(name.as_str()) else {
            return Err(AppError::Validation(format!("unknown column '{}'", name)));
        };
        assignments.push(((*column).clone(), value));
    }
    if assignments.is_empty() {
        return Err(AppError::Validation("no fields to update".into()));
    }

    let update = RowUpdate {
        assignments,
        id_column: by_name.get(ID_COLUMN).map(|c| (*c).clone()),
        id,
    };
    let affected = bounded(state.limits.query_timeout, state.store.update_by_id(table, &update)).await?;
    tracing::debug!(table, affected, "update applied");
    Ok(success(IdBody { id: update.id }).into_response())
}
