//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

use super::{env_seconds, ConfigError};

/// Default access token lifetime in seconds (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;

/// Default refresh token lifetime in seconds (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;

/// JWT signing configuration
///
/// Access and refresh tokens are signed with distinct secrets so that one
/// kind can never be presented where the other is expected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing and verifying access tokens
    pub access_secret: String,

    /// Secret for signing and verifying refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Load the JWT configuration from environment variables
    ///
    /// `JWT_ACCESS_SECRET` and `JWT_REFRESH_SECRET` are required and must
    /// differ; there is no usable default for either. Expiries fall back
    /// to 15 minutes / 7 days.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_ACCESS_SECRET"))?;
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_REFRESH_SECRET"))?;

        if access_secret == refresh_secret {
            return Err(ConfigError::InvalidVar {
                name: "JWT_REFRESH_SECRET",
                reason: "must differ from JWT_ACCESS_SECRET".to_string(),
            });
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_token_expiry: env_seconds("JWT_ACCESS_EXPIRES_IN", DEFAULT_ACCESS_TOKEN_EXPIRY)?,
            refresh_token_expiry: env_seconds(
                "JWT_REFRESH_EXPIRES_IN",
                DEFAULT_REFRESH_TOKEN_EXPIRY,
            )?,
        })
    }
}
