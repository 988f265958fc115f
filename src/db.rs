use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;
use tracing::log::LevelFilter;

/// Configure SQLite PRAGMAs
///
/// - WAL mode lets readers run next to the single writer
/// - busy_timeout reduces SQLITE_BUSY errors
/// - synchronous=NORMAL is safe with WAL
/// - temp_store=memory speeds up temporary tables
async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA temp_store = memory")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create a read-only connection pool for queries
///
/// The write pool must have been opened first so the database file exists
/// and is already in WAL mode.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .busy_timeout(std::time::Duration::from_secs(5))
        .log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        "Created read-only pool with {} max connections",
        max_connections
    );

    Ok(pool)
}

/// Create a read-write connection pool
///
/// Limited to 1 connection to avoid SQLITE_BUSY errors on writes. Creates the
/// database file when missing.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    create_pool(database_url, 1).await
}

/// Create a standard pool with PRAGMAs applied
///
/// Used for the write side, CLI commands and tests.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!("Created pool with {} max connections", max_connections);

    Ok(pool)
}

/// Apply every pending schema migration.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    cookshare_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}

/// True for SQLite URLs that never touch a file.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.ends_with(":memory:") || database_url.contains("mode=memory")
}

/// Migrated pools for the running server.
///
/// A file database gets the single-connection write pool and a read-only
/// pool. An in-memory database only lives as long as its connections and is
/// private to the options it was opened with, so reads and writes share one
/// pool that never drops its connection.
pub async fn open_state(
    database_url: &str,
    max_read_connections: u32,
) -> Result<cookshare_shared::State> {
    if is_in_memory(database_url) {
        let options = SqliteConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        migrate(&pool).await?;
        tracing::warn!("Using an in-memory database, data is lost on shutdown");

        return Ok(cookshare_shared::State::single(pool));
    }

    let write_db = create_write_pool(database_url).await?;
    migrate(&write_db).await?;

    // Opened after migrations, the file must exist
    let read_db = create_read_pool(database_url, max_read_connections).await?;

    Ok(cookshare_shared::State { read_db, write_db })
}
