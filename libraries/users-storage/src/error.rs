/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// A UNIQUE constraint rejected the write
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: String, value: String },

    /// Stored value could not be mapped back to a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a duplicate error
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<StorageError> for users_core::UsersError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { value, .. } => users_core::UsersError::duplicate(value),
            StorageError::Database(e) => e.into(),
            other => users_core::UsersError::storage(other.to_string()),
        }
    }
}
