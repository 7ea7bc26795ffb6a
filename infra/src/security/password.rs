//! Bcrypt-backed password hashing.

use ag_core::errors::{DomainError, DomainResult};
use ag_core::services::auth::PasswordHasher;

/// Cost factor applied to new password hashes
pub const BCRYPT_COST: u32 = 10;

/// Bcrypt implementation of the password hashing boundary
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the default cost
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Create a hasher with a custom cost (lower costs are for tests)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(plain, hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }
}
