/// Core error types for the users service
use thiserror::Error;

/// Result type alias using `UsersError`
pub type Result<T> = std::result::Result<T, UsersError>;

/// Core error type for the users service
#[derive(Error, Debug)]
pub enum UsersError {
    /// Payload did not have the required shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A unique field already holds this value
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl UsersError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for UsersError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
