//! Password hashing boundary.

use crate::errors::DomainResult;

/// One-way hash/verify capability for passwords
///
/// The concrete algorithm lives in the infrastructure layer; the session
/// engine only ever hashes on registration and compares on login. Plain
/// passwords never cross any other seam.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain: &str) -> DomainResult<String>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool>;
}
