//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing secrets and lifetimes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use std::fmt;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Error raised when required configuration is missing or malformed
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is not set
    MissingVar(&'static str),

    /// A variable is set to an unusable value
    InvalidVar {
        name: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "Missing required environment variable: {}", name)
            }
            ConfigError::InvalidVar { name, reason } => {
                write!(f, "Invalid value for {}: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reads an optional integer environment variable, in seconds
pub(crate) fn env_seconds(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse::<i64>().ok().filter(|v| *v > 0).ok_or_else(|| {
            ConfigError::InvalidVar {
                name,
                reason: format!("expected a positive number of seconds, got {:?}", raw),
            }
        }),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    ///
    /// Fails when a required variable (signing secrets, database URL) is
    /// absent or unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
        })
    }
}
