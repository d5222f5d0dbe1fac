/// Server error types
use crate::api::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use users_core::UsersError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Failure messages shown to clients
pub mod messages {
    pub const INVALID_PAYLOAD: &str = "Carga inválida.";
    pub const DUPLICATE_EMAIL: &str = "Disculpa. El email ya existe.";
    pub const USER_NOT_FOUND: &str = "Usuario no existe";
    pub const INTERNAL: &str = "Error interno del servidor";
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] users_storage::StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UsersError> for ServerError {
    fn from(err: UsersError) -> Self {
        match err {
            UsersError::InvalidInput(msg) => ServerError::InvalidPayload(msg),
            UsersError::Duplicate(value) => ServerError::DuplicateEmail(value),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidPayload(ref reason) => {
                tracing::debug!("Rejected payload: {}", reason);
                (StatusCode::BAD_REQUEST, messages::INVALID_PAYLOAD)
            }
            ServerError::DuplicateEmail(ref email) => {
                tracing::debug!("Duplicate email: {}", email);
                (StatusCode::BAD_REQUEST, messages::DUPLICATE_EMAIL)
            }
            ServerError::UserNotFound(_) => (StatusCode::NOT_FOUND, messages::USER_NOT_FOUND),
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
        };

        (status, Json(Envelope::fail(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use users_storage::StorageError;

    #[test]
    fn test_core_errors_map_to_client_failures() {
        assert!(matches!(
            ServerError::from(UsersError::invalid_input("missing field `email`")),
            ServerError::InvalidPayload(_)
        ));
        assert!(matches!(
            ServerError::from(UsersError::duplicate("abel.huanca@upeu.edu.pe")),
            ServerError::DuplicateEmail(_)
        ));
        assert!(matches!(
            ServerError::from(UsersError::storage("disk full")),
            ServerError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::InvalidPayload(String::new()), StatusCode::BAD_REQUEST),
            (ServerError::DuplicateEmail(String::new()), StatusCode::BAD_REQUEST),
            (ServerError::UserNotFound("999".to_string()), StatusCode::NOT_FOUND),
            (
                ServerError::Database(StorageError::CorruptRow("created_at".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
