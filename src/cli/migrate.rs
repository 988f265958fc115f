use anyhow::Result;
use sqlx::{Sqlite, migrate::MigrateDatabase};

use crate::config::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: Config) -> Result<()> {
    let url = config.database.connection_url();
    tracing::info!(database = config.database.name, "Running database migrations...");

    let pool = crate::db::create_pool(&url, 1).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: Config) -> Result<()> {
    let url = config.database.connection_url();
    tracing::info!("Resetting database...");

    if Sqlite::database_exists(&url).await? {
        tracing::warn!("Dropping existing database: {url}");
        Sqlite::drop_database(&url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
