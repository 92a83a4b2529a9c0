//! Builds the explorer's statements. Identifiers are quoted; values go through placeholders.

use crate::catalog::ColumnInfo;
use crate::sql::params::SqlParam;
use serde_json::Value;

/// Column every record-level statement keys on.
pub const ID_COLUMN: &str = "id";

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Placeholder with a cast to the column's declared type, e.g. `$2::"pg_catalog"."int4"`.
fn cast_placeholder(n: usize, column: Option<&ColumnInfo>) -> String {
    match column {
        Some(c) => format!("${}::{}", n, c.cast_type()),
        None => format!("${}", n),
    }
}

/// Names of the tables and views in one schema.
pub fn table_names(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlParam::text(schema));
    q.sql = "SELECT table_name::text FROM information_schema.tables WHERE table_schema = $1".into();
    q
}

/// Column names and types of one table, in ordinal order.
pub fn table_columns(schema: &str, table: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlParam::text(schema));
    q.push_param(SqlParam::text(table));
    q.sql = "SELECT column_name::text, udt_schema::text, udt_name::text FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 ORDER BY ordinal_position"
        .into();
    q
}

/// One page of a table; limit and offset are bound, never spliced.
pub fn select_page(schema: &str, table: &str, limit: u32, offset: u32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let l = q.push_param(SqlParam::BigInt(limit.into()));
    let o = q.push_param(SqlParam::BigInt(offset.into()));
    q.sql = format!("SELECT * FROM {} LIMIT ${} OFFSET ${}", qualified_table(schema, table), l, o);
    q
}

/// Single record by id. The path id is bound as text and cast to the key's type.
pub fn select_by_id(schema: &str, table: &str, id_column: Option<&ColumnInfo>, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::text(id));
    q.sql = format!(
        "SELECT * FROM {} WHERE {} = {}",
        qualified_table(schema, table),
        quoted(ID_COLUMN),
        cast_placeholder(n, id_column)
    );
    q
}

/// UPDATE by id: one SET per assignment in the given order, id bound last.
pub fn update(
    schema: &str,
    table: &str,
    assignments: &[(ColumnInfo, Value)],
    id_column: Option<&ColumnInfo>,
    id: &Value,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(assignments.len());
    for (column, value) in assignments {
        let n = q.push_param(SqlParam::from_json(value));
        sets.push(format!("{} = {}", quoted(&column.name), cast_placeholder(n, Some(column))));
    }
    let n = q.push_param(SqlParam::from_json(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        qualified_table(schema, table),
        sets.join(", "),
        quoted(ID_COLUMN),
        cast_placeholder(n, id_column)
    );
    q
}
