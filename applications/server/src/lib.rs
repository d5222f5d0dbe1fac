//! Users Server Library
//!
//! HTTP service for creating and listing users.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use app::create_app;
pub use config::{AppEnvironment, ServerConfig};
pub use error::{Result, ServerError};
pub use services::TestRunner;
pub use state::AppState;
