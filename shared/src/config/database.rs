//! Database configuration module

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl DatabaseConfig {
    /// Create a new database configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Load the database configuration from environment variables
    ///
    /// `DATABASE_URL` is required; pool parameters are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Err(_) => 10,
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "DATABASE_MAX_CONNECTIONS",
                reason: format!("expected a number, got {:?}", raw),
            })?,
        };

        Ok(Self::new(url).with_max_connections(max_connections))
    }

    /// Check if this points at a production database
    pub fn is_production(&self) -> bool {
        !self.url.contains("localhost") && !self.url.contains("127.0.0.1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::new("mysql://localhost:3306/authgate");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout, 30);
        assert!(!config.is_production());
    }

    #[test]
    fn test_database_config_builder() {
        let config = DatabaseConfig::new("mysql://db.internal:3306/authgate").with_max_connections(50);
        assert_eq!(config.max_connections, 50);
        assert!(config.is_production());
    }
}
