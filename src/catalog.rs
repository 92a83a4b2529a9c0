//! Schema catalog: the set of tables the explorer serves, loaded once at startup.

use crate::error::AppError;
use crate::sql::quoted;
use crate::store::RecordStore;
use std::collections::HashSet;

/// One column as reported by `information_schema.columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub udt_schema: String,
    pub udt_name: String,
}

impl ColumnInfo {
    /// Schema-qualified type name usable in a cast, e.g. `"pg_catalog"."int4"`.
    pub fn cast_type(&self) -> String {
        format!("{}.{}", quoted(&self.udt_schema), quoted(&self.udt_name))
    }
}

/// Table names known to the explorer. Immutable after [`TableCatalog::load`]; column
/// lists are never cached here and are fetched per request through [`TableCatalog::columns_of`].
#[derive(Clone, Debug, Default)]
pub struct TableCatalog {
    tables: HashSet<String>,
}

impl TableCatalog {
    /// Introspect the store's schema. Failure here is fatal to startup.
    pub async fn load(store: &dyn RecordStore) -> Result<Self, AppError> {
        let names = store.table_names().await?;
        Ok(Self::from_names(names))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableCatalog {
            tables: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains(table)
    }

    /// All table names, sorted lexicographically.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Columns of `table` in ordinal order, fresh from the database on every call.
    pub async fn columns_of(&self, store: &dyn RecordStore, table: &str) -> Result<Vec<ColumnInfo>, AppError> {
        store.table_columns(table).await
    }
}
