//! Users Core
//!
//! Domain types, validation, and the storage seam for the users service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserSummary`, `CreateUser`
//! - **Core Traits**: `UserStore`, implemented by the storage crate
//! - **Error Handling**: Unified `UsersError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use users_core::types::{CreateUser, NewUserPayload};
//!
//! let payload = NewUserPayload {
//!     username: Some("abel".to_string()),
//!     email: Some("abel.huanca@upeu.edu.pe".to_string()),
//! };
//! let user = CreateUser::try_from(payload).unwrap();
//! assert_eq!(user.email, "abel.huanca@upeu.edu.pe");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{Result, UsersError};
pub use storage::UserStore;
pub use types::{CreateUser, NewUserPayload, User, UserId, UserSummary};
