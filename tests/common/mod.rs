//! In-memory store and request helpers shared by the router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use db_explorer::{
    explorer_routes, AppError, AppState, ColumnInfo, Page, QueryLimits, RecordStore, Row, RowUpdate, Scalar,
    TableCatalog,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// One call the router made into the store.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    TableNames,
    TableColumns(String),
    SelectPage(String, Page),
    SelectById(String, Option<ColumnInfo>, String),
    Update(String, RowUpdate),
}

struct MemTable {
    columns: Vec<ColumnInfo>,
    rows: Vec<Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, MemTable>>,
    calls: Mutex<Vec<Call>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

pub fn column(name: &str, udt: &str) -> ColumnInfo {
    ColumnInfo {
        name: name.into(),
        udt_schema: "pg_catalog".into(),
        udt_name: udt.into(),
    }
}

fn id_text(v: &Scalar) -> Option<String> {
    match v {
        Scalar::Int(n) => Some(n.to_string()),
        Scalar::Text(s) => Some(s.clone()),
        _ => None,
    }
}

/// The server-side cast of a bound text id to the key column's type.
fn cast_id(id: &str, id_column: Option<&ColumnInfo>) -> Result<Scalar, AppError> {
    let Some(column) = id_column else {
        return Err(AppError::Db(sqlx::Error::Protocol("column \"id\" does not exist".into())));
    };
    match column.udt_name.as_str() {
        "int2" | "int4" | "int8" => id.trim().parse::<i64>().map(Scalar::Int).map_err(|_| {
            AppError::Db(sqlx::Error::Protocol(format!(
                "invalid input syntax for type integer: \"{}\"",
                id
            )))
        }),
        _ => Ok(Scalar::Text(id.to_string())),
    }
}

fn json_to_scalar(v: &serde_json::Value) -> Scalar {
    match v {
        serde_json::Value::Null => Scalar::Null,
        serde_json::Value::Bool(b) => Scalar::Bool(*b),
        serde_json::Value::Number(n) => n.as_i64().map(Scalar::Int).unwrap_or_else(|| Scalar::Float(n.as_f64().unwrap_or_default())),
        serde_json::Value::String(s) => Scalar::Text(s.clone()),
        other => Scalar::Text(other.to_string()),
    }
}

impl MemoryStore {
    /// The `items` / `users` fixture.
    pub fn fixture() -> Self {
        let store = MemoryStore::default();
        store.add_table(
            "items",
            vec![
                column("id", "int4"),
                column("title", "varchar"),
                column("description", "text"),
                column("updated", "varchar"),
            ],
            vec![
                vec![
                    ("id", Scalar::Int(1)),
                    ("title", "database/sql".into()),
                    ("description", "Рассказать про базы данных".into()),
                    ("updated", "rvasily".into()),
                ],
                vec![
                    ("id", Scalar::Int(2)),
                    ("title", "memcache".into()),
                    ("description", "Рассказать про мемкеш с примером использования".into()),
                    ("updated", Scalar::Null),
                ],
            ],
        );
        store.add_table(
            "users",
            vec![
                column("user_id", "int4"),
                column("login", "varchar"),
                column("password", "varchar"),
                column("email", "varchar"),
                column("info", "text"),
                column("updated", "varchar"),
            ],
            vec![vec![
                ("user_id", Scalar::Int(1)),
                ("login", "rvasily".into()),
                ("password", "love".into()),
                ("email", "rvasily@example.com".into()),
                ("info", "none".into()),
                ("updated", Scalar::Null),
            ]],
        );
        store
    }

    pub fn add_table(&self, name: &str, columns: Vec<ColumnInfo>, rows: Vec<Vec<(&str, Scalar)>>) {
        let rows = rows.into_iter().map(|cells| cells.into_iter().collect()).collect();
        self.tables
            .lock()
            .unwrap()
            .insert(name.to_string(), MemTable { columns, rows });
    }

    /// Every query fails with a driver protocol error carrying `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Every query sleeps first.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn enter(&self, call: Call) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        match &self.failure {
            Some(m) => Err(AppError::Db(sqlx::Error::Protocol(m.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn table_names(&self) -> Result<Vec<String>, AppError> {
        self.enter(Call::TableNames).await?;
        Ok(self.tables.lock().unwrap().keys().cloned().collect())
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, AppError> {
        self.enter(Call::TableColumns(table.to_string())).await?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn select_page(&self, table: &str, page: Page) -> Result<Vec<Row>, AppError> {
        self.enter(Call::SelectPage(table.to_string(), page)).await?;
        let tables = self.tables.lock().unwrap();
        let rows = tables.get(table).map(|t| t.rows.as_slice()).unwrap_or_default();
        Ok(rows
            .iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn select_by_id(&self, table: &str, id_column: Option<&ColumnInfo>, id: &str) -> Result<Option<Row>, AppError> {
        self.enter(Call::SelectById(table.to_string(), id_column.cloned(), id.to_string()))
            .await?;
        let key = cast_id(id, id_column)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .and_then(|t| t.rows.iter().find(|r| r.get("id") == Some(&key)).cloned()))
    }

    async fn update_by_id(&self, table: &str, update: &RowUpdate) -> Result<u64, AppError> {
        self.enter(Call::Update(table.to_string(), update.clone())).await?;
        let id = id_text(&json_to_scalar(&update.id)).unwrap_or_default();
        let key = cast_id(&id, update.id_column.as_ref())?;
        let mut tables = self.tables.lock().unwrap();
        let Some(t) = tables.get_mut(table) else { return Ok(0) };
        let mut affected = 0;
        for row in t.rows.iter_mut() {
            if row.get("id") != Some(&key) {
                continue;
            }
            let cells: Vec<(String, Scalar)> = row
                .columns()
                .map(|c| {
                    let assigned = update.assignments.iter().find(|(col, _)| col.name == c);
                    let value = match assigned {
                        Some((_, v)) => json_to_scalar(v),
                        None => row.get(c).cloned().unwrap_or(Scalar::Null),
                    };
                    (c.to_string(), value)
                })
                .collect();
            *row = cells.into_iter().collect();
            affected += 1;
        }
        Ok(affected)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub async fn app_with(store: MemoryStore, limits: QueryLimits) -> TestApp {
    let store = Arc::new(store);
    let catalog = TableCatalog::load(store.as_ref()).await.expect("catalog");
    store.clear_calls();
    let state = AppState::new(store.clone(), catalog, limits);
    TestApp {
        router: explorer_routes(state, 1024),
        store,
    }
}

/// Router over a fixed catalog; the store is only consulted by requests.
pub async fn app_with_catalog(store: MemoryStore, tables: &[&str], limits: QueryLimits) -> TestApp {
    let store = Arc::new(store);
    let state = AppState::new(store.clone(), TableCatalog::from_names(tables.iter().copied()), limits);
    TestApp {
        router: explorer_routes(state, 1024),
        store,
    }
}

pub async fn app() -> TestApp {
    app_with(MemoryStore::fixture(), QueryLimits::default()).await
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("not json ({}): {}", e, body))
}
