//! # AuthGate Infrastructure
//!
//! Infrastructure layer for the AuthGate backend: MySQL repository
//! implementations, the bcrypt password hasher, and in-memory mock
//! repositories used by integration tests.

pub mod database;
pub mod repositories;
pub mod security;

pub use database::create_pool;
pub use repositories::{MockTokenRepository, MockUserRepository};
pub use security::BcryptPasswordHasher;
