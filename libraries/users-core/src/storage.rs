//! Storage trait for user persistence

use crate::error::Result;
use crate::types::{CreateUser, User, UserId};
use async_trait::async_trait;

/// Storage context providing access to user records
///
/// Handlers only see this trait, so the HTTP layer can be assembled around
/// any implementation (the `SQLite` one in `users-storage`, or a test double).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user in its own transaction.
    ///
    /// Returns `UsersError::Duplicate` when the email is already taken; the
    /// transaction is rolled back and nothing is written.
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Get all users, oldest first
    async fn get_all_users(&self) -> Result<Vec<User>>;
}
