//! Database collaborator: the operations the router needs, and the PostgreSQL implementation.

mod decode;
mod postgres;

pub use postgres::PgStore;

use crate::catalog::ColumnInfo;
use crate::error::AppError;
use crate::value::Row;
use async_trait::async_trait;
use serde_json::Value;

/// Default page size when `limit` is absent or empty.
pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// A validated write: every assignment names a known column.
#[derive(Clone, Debug, PartialEq)]
pub struct RowUpdate {
    pub assignments: Vec<(ColumnInfo, Value)>,
    /// Catalog entry for the `id` column, when the table has one.
    pub id_column: Option<ColumnInfo>,
    pub id: Value,
}

/// Everything the explorer asks of the database. Implementations own pooling,
/// connection lifecycle and cancellation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn table_names(&self) -> Result<Vec<String>, AppError>;

    async fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, AppError>;

    async fn select_page(&self, table: &str, page: Page) -> Result<Vec<Row>, AppError>;

    /// First row whose id matches, if any. The raw path id is cast to `id_column`'s
    /// type by the database, so malformed ids surface as driver errors.
    async fn select_by_id(&self, table: &str, id_column: Option<&ColumnInfo>, id: &str) -> Result<Option<Row>, AppError>;

    /// Returns rows affected.
    async fn update_by_id(&self, table: &str, update: &RowUpdate) -> Result<u64, AppError>;
}
