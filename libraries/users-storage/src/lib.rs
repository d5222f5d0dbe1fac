//! Users Storage
//!
//! `SQLite` persistence for the users service.
//!
//! # Example
//!
//! ```rust,no_run
//! use users_storage::{LocalUserStore, create_pool, run_migrations};
//! use users_core::{CreateUser, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://users.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let store = LocalUserStore::new(pool);
//! store.create_user(CreateUser::new("abel", "abel.huanca@upeu.edu.pe")).await?;
//! let users = store.get_all_users().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod seed;
pub mod users;

pub use context::LocalUserStore;
pub use error::{Result, StorageError};
pub use sqlx::SqlitePool;

use sqlx::migrate::Migrator;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup so the schema matches the current model.
pub async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Drop every table, then rebuild the schema from the embedded migrations.
///
/// Destructive. The migration ledger is dropped as well so that every
/// migration is re-applied from scratch.
pub async fn recreate_schema(pool: &SqlitePool) -> Result<()> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_all(pool)
    .await?;

    let mut tx = pool.begin().await?;
    for table in &tables {
        let statement = format!("DROP TABLE IF EXISTS \"{}\"", table.replace('"', "\"\""));
        sqlx::query(&statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(dropped = tables.len(), "Dropped all tables");

    run_migrations(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://users.db>`)
/// * `max_connections` - Upper bound on pooled connections
///
/// Missing parent directories of a file database are created. In-memory
/// databases are private to one connection, so the pool is pinned to a single
/// connection that is never recycled.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> std::result::Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let in_memory = database_url.contains(":memory:");

    if !in_memory {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool_options.connect_with(options).await?;

    tracing::debug!("Pool created");

    Ok(pool)
}
