//! DB Explorer: a generic REST façade over the tables of one PostgreSQL schema.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod value;

pub use catalog::{ColumnInfo, TableCatalog};
pub use config::{ExplorerConfig, QueryLimits};
pub use error::{AppError, ConfigError};
pub use response::{error_body, success};
pub use routes::{explorer_routes, RequestPath};
pub use state::AppState;
pub use store::{Page, PgStore, RecordStore, RowUpdate};
pub use value::{Row, Scalar};
