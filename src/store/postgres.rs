//! [`RecordStore`] over a sqlx PostgreSQL pool.

use super::decode::pg_row_to_row;
use super::{Page, RecordStore, RowUpdate};
use crate::catalog::ColumnInfo;
use crate::error::AppError;
use crate::sql::{self, bind_params, QueryBuf};
use crate::value::Row;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    /// Serve the tables of `schema` through `pool`.
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<PgRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query(&q.sql), &q.params).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<PgRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query(&q.sql), &q.params).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_params(sqlx::query(&q.sql), &q.params).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn table_names(&self) -> Result<Vec<String>, AppError> {
        use sqlx::Row as _;
        let q = sql::table_names(&self.schema);
        let rows = self.fetch_all(&q).await?;
        let mut names = Vec::with_capacity(rows.len());
        for r in &rows {
            names.push(r.try_get::<String, _>(0)?);
        }
        Ok(names)
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, AppError> {
        use sqlx::Row as _;
        let q = sql::table_columns(&self.schema, table);
        let rows = self.fetch_all(&q).await?;
        let mut columns = Vec::with_capacity(rows.len());
        for r in &rows {
            columns.push(ColumnInfo {
                name: r.try_get(0)?,
                udt_schema: r.try_get(1)?,
                udt_name: r.try_get(2)?,
            });
        }
        Ok(columns)
    }

    async fn select_page(&self, table: &str, page: Page) -> Result<Vec<Row>, AppError> {
        let q = sql::select_page(&self.schema, table, page.limit, page.offset);
        let rows = self.fetch_all(&q).await?;
        Ok(rows.iter().map(pg_row_to_row).collect())
    }

    async fn select_by_id(&self, table: &str, id_column: Option<&ColumnInfo>, id: &str) -> Result<Option<Row>, AppError> {
        let q = sql::select_by_id(&self.schema, table, id_column, id);
        let row = self.fetch_optional(&q).await?;
        Ok(row.as_ref().map(pg_row_to_row))
    }

    async fn update_by_id(&self, table: &str, update: &RowUpdate) -> Result<u64, AppError> {
        let q = sql::update(
            &self.schema,
            table,
            &update.assignments,
            update.id_column.as_ref(),
            &update.id,
        );
        self.execute(&q).await
    }
}
