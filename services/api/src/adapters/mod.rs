pub mod db;

pub use db::DbAdapter;

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use textbook_scan_core::{DatabaseService, InMemoryDatabase};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;

/// Connects the persistence gateway selected by `DATABASE_URL`.
///
/// Postgres connections also apply the bundled migrations before returning.
pub async fn connect(config: &Config) -> Result<Arc<dyn DatabaseService>, ApiError> {
    if config.uses_in_memory_database() {
        warn!("Using the in-memory store; data is lost on shutdown.");
        return Ok(Arc::new(InMemoryDatabase::new()));
    }

    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    let db_adapter = DbAdapter::new(db_pool);
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    Ok(Arc::new(db_adapter))
}
