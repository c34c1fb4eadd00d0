// Exports all the modules for use in the application

pub mod config;
pub mod errors;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod services;

// Re-export common types
pub use crate::config::AppConfig;
pub use crate::config::DbPool;
pub use crate::errors::ApiError;
pub use crate::models::{RoleName, User};
