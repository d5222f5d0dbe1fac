/// User domain types
use crate::error::UsersError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned user identifier
pub type UserId = i64;

/// User record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, assigned on insert
    pub id: UserId,

    pub username: String,

    /// Unique across all users
    pub email: String,

    /// Set once on insert
    pub created_at: DateTime<Utc>,
}

/// User as it appears in collection responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Untrusted add-user payload, as decoded from JSON or a form.
///
/// Every field is optional here; `CreateUser::try_from` decides whether the
/// payload is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUserPayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

impl CreateUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

impl TryFrom<NewUserPayload> for CreateUser {
    type Error = UsersError;

    fn try_from(payload: NewUserPayload) -> Result<Self, Self::Error> {
        match (payload.username, payload.email) {
            (Some(username), Some(email)) => Ok(Self { username, email }),
            (None, _) => Err(UsersError::invalid_input("missing field `username`")),
            (_, None) => Err(UsersError::invalid_input("missing field `email`")),
        }
    }
}
