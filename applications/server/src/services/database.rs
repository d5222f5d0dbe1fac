/// Database management behind the `serve`, `recreate_db` and `seed_db` commands
use crate::{config::ServerConfig, error::Result};
use users_core::types::User;
use users_storage::{SqlitePool, StorageError};

/// Open the pool for the active environment's database
pub async fn open_pool(config: &ServerConfig) -> Result<SqlitePool> {
    let pool =
        users_storage::create_pool(config.active_database_url(), config.storage.max_connections)
            .await
            .map_err(StorageError::from)?;
    Ok(pool)
}

/// Open the pool and bring the schema up to date
pub async fn open_migrated_pool(config: &ServerConfig) -> Result<SqlitePool> {
    let pool = open_pool(config).await?;
    users_storage::run_migrations(&pool)
        .await
        .map_err(StorageError::from)?;
    Ok(pool)
}

/// Drop every table and rebuild the schema
pub async fn recreate_db(config: &ServerConfig, force: bool) -> Result<()> {
    config.ensure_recreate_allowed(force)?;

    let pool = open_pool(config).await?;
    users_storage::recreate_schema(&pool).await?;
    pool.close().await;

    tracing::info!("Database recreated");
    Ok(())
}

/// Insert the fixed users. Fails without writing anything when any of them
/// already exists.
pub async fn seed_db(config: &ServerConfig) -> Result<Vec<User>> {
    let pool = open_migrated_pool(config).await?;
    let result = users_storage::seed::seed(&pool).await;
    pool.close().await;

    let users = result?;
    tracing::info!(count = users.len(), "Database seeded");
    Ok(users)
}
