//! Startup configuration from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/db_go";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Time bounds applied to request queries.
///
/// Only table listing is bounded by default; every other query runs until the
/// driver returns unless `query_timeout` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryLimits {
    pub list_timeout: Duration,
    pub query_timeout: Option<Duration>,
}

impl Default for QueryLimits {
    fn default() -> Self {
        QueryLimits {
            list_timeout: DEFAULT_LIST_TIMEOUT,
            query_timeout: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    pub database_url: String,
    pub listen_addr: String,
    /// Schema whose tables are exposed.
    pub schema: String,
    pub max_connections: u32,
    pub body_limit: usize,
    pub limits: QueryLimits,
}

impl ExplorerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let schema = var("EXPLORER_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        let list_timeout = parse_var::<u64>(var("LIST_TIMEOUT_MS"), "LIST_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LIST_TIMEOUT);
        let query_timeout = parse_var::<u64>(var("QUERY_TIMEOUT_MS"), "QUERY_TIMEOUT_MS")?.map(Duration::from_millis);
        let max_connections = parse_var(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(ExplorerConfig {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            listen_addr: var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
            schema,
            max_connections,
            body_limit: parse_var(var("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES")?.unwrap_or(DEFAULT_BODY_LIMIT),
            limits: QueryLimits {
                list_timeout,
                query_timeout,
            },
        })
    }
}

fn parse_var<T: FromStr>(value: Option<String>, var: &'static str) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| v.parse::<T>().map_err(|_| ConfigError::InvalidVar { var, value: v }))
        .transpose()
}
