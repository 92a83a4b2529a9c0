//! Shared application state for the explorer routes. Nothing in it changes after startup.

use crate::catalog::TableCatalog;
use crate::config::QueryLimits;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<TableCatalog>,
    pub limits: QueryLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, catalog: TableCatalog, limits: QueryLimits) -> Self {
        AppState {
            store,
            catalog: Arc::new(catalog),
            limits,
        }
    }
}
