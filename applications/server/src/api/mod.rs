/// API route modules
pub mod index;
pub mod response;
pub mod users;
