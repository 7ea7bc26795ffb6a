//! Shared utilities and common types for the AuthGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The API response envelope
//! - Validation utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, ServerConfig};
pub use types::response::{ApiResponse, ErrorBody};
pub use utils::validation;
