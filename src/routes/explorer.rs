//! The explorer's single entry point: parse the path, check the table, dispatch by method.
//! Mounted as the router fallback so any path shape reaches it, including trailing slashes.

use super::path::RequestPath;
use crate::error::AppError;
use crate::handlers::{create_record, delete_record, get_record, list_records, list_tables, update_record};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use tower_http::limit::RequestBodyLimitLayer;

pub fn explorer_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    match route(&state, &method, uri.path(), &params, &body).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    params: &HashMap<String, String>,
    body: &[u8],
) -> Result<Response, AppError> {
    let path = RequestPath::parse(path);

    // Unsupported record writes answer before any lookup.
    match (method, path) {
        (&Method::POST, RequestPath::Record(..)) => return create_record(),
        (&Method::DELETE, RequestPath::Record(..)) => return delete_record(),
        _ => {}
    }

    let Some(table) = path.table() else {
        return match *method {
            Method::GET => Ok(list_tables(state)),
            _ => Err(AppError::MethodNotAllowed),
        };
    };
    if !state.catalog.contains(table) {
        return Err(AppError::UnknownTable);
    }

    match (method, path) {
        (&Method::GET, RequestPath::Table(_)) => list_records(state, table, params).await,
        (&Method::PUT, RequestPath::Table(_)) => update_record(state, table, body).await,
        (&Method::GET, RequestPath::Record(_, id)) => get_record(state, table, id).await,
        (_, RequestPath::Nested(_)) => Err(AppError::NotFound),
        _ => Err(AppError::MethodNotAllowed),
    }
}
