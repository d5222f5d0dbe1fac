//! User record queries

use crate::{Result, StorageError};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use users_core::types::{CreateUser, User, UserId};

/// Create a user in its own transaction
///
/// A duplicate email rolls the transaction back and returns
/// `StorageError::Duplicate`.
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let mut tx = pool.begin().await?;

    match insert(&mut *tx, &user).await {
        Ok(created) => {
            tx.commit().await?;
            Ok(created)
        }
        Err(err) => {
            tx.rollback().await?;
            Err(err)
        }
    }
}

/// Insert a user on an existing connection or transaction
pub async fn insert(conn: &mut SqliteConnection, user: &CreateUser) -> Result<User> {
    let created_at = Utc::now().timestamp_millis();

    let result = sqlx::query("INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)")
        .bind(&user.username)
        .bind(&user.email)
        .bind(created_at)
        .execute(conn)
        .await;

    match result {
        Ok(done) => Ok(User {
            id: done.last_insert_rowid(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: timestamp(created_at)?,
        }),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(StorageError::duplicate("email", &user.email))
        }
        Err(err) => Err(err.into()),
    }
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users ordered by creation time
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT id, username, email, created_at FROM users ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Count stored users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

fn from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at: timestamp(row.get("created_at"))?,
    })
}

fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StorageError::CorruptRow(format!("Invalid timestamp: {}", millis)))
}
