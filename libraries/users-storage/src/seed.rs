//! Fixed development data

use crate::{users, Result};
use sqlx::SqlitePool;
use users_core::types::{CreateUser, User};

/// Users inserted by `seed`, in insertion order
pub const SEED_USERS: &[(&str, &str)] = &[
    ("fredy", "abelthf@gmail.com"),
    ("abel", "abel.huanca@upeu.edu.pe"),
];

/// Insert the seed users in one transaction.
///
/// Not idempotent: on a second run the email constraint fails, the
/// transaction is rolled back, and `StorageError::Duplicate` is returned.
pub async fn seed(pool: &SqlitePool) -> Result<Vec<User>> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(SEED_USERS.len());

    for (username, email) in SEED_USERS {
        match users::insert(&mut *tx, &CreateUser::new(*username, *email)).await {
            Ok(user) => created.push(user),
            Err(err) => {
                tx.rollback().await?;
                return Err(err);
            }
        }
    }

    tx.commit().await?;
    Ok(created)
}
