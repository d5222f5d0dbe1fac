//! Domain types

mod user;

pub use user::{CreateUser, NewUserPayload, User, UserId, UserSummary};
