//! HTTP handlers for tables and records.

pub mod records;
pub mod tables;
pub use records::*;
pub use tables::*;

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// Run a store call, failing with [`AppError::Timeout`] once `limit` elapses.
pub(crate) async fn bounded<T, F>(limit: Option<Duration>, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match limit {
        Some(d) => tokio::time::timeout(d, fut).await.map_err(|_| AppError::Timeout(d))?,
        None => fut.await,
    }
}
