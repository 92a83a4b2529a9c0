//! Bind parameters and their conversion from request JSON.

use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to a positional placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    BigInt(i64),
    /// Text or SQL NULL. Write values travel as text and are cast to the column type in SQL.
    Text(Option<String>),
}

impl SqlParam {
    pub fn text(s: impl Into<String>) -> Self {
        SqlParam::Text(Some(s.into()))
    }

    /// Textual form of a body value: strings verbatim, null as SQL NULL, everything else as JSON text.
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => SqlParam::Text(None),
            Value::String(s) => SqlParam::Text(Some(s.clone())),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => SqlParam::Text(Some(v.to_string())),
        }
    }
}

pub fn bind_params<'q>(mut query: Query<'q, Postgres, PgArguments>, params: &[SqlParam]) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::BigInt(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.clone()),
        };
    }
    query
}
