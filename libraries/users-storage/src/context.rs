use crate::users;
use async_trait::async_trait;
use sqlx::SqlitePool;
use users_core::{error::Result, storage::UserStore, types::*};

/// Local user store backed by `SQLite`
#[derive(Clone)]
pub struct LocalUserStore {
    pool: SqlitePool,
}

impl LocalUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for LocalUserStore {
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }
}
