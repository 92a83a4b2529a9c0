//! Explorer server: reads config from env, introspects the schema, serves the REST surface.

use db_explorer::{explorer_routes, AppState, ExplorerConfig, PgStore, TableCatalog};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("db_explorer=info")))
        .init();

    let config = ExplorerConfig::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let store = PgStore::new(pool, config.schema.clone());
    let catalog = TableCatalog::load(&store).await?;
    tracing::info!(schema = %config.schema, tables = catalog.len(), "catalog loaded");

    let state = AppState::new(Arc::new(store), catalog, config.limits.clone());
    let app = explorer_routes(state, config.body_limit);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
