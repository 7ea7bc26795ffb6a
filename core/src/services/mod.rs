//! Business services orchestrating the domain.

pub mod auth;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, PasswordHasher};
pub use token::{TokenService, TokenServiceConfig};
