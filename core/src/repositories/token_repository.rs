//! Token repository trait defining the interface for the refresh-token
//! ledger.
//!
//! The ledger holds one row per issued refresh token, keyed by the
//! token's SHA-256 digest. Records are revoked at most once and never
//! deleted, which preserves the rotation chain as an audit trail.
//!
//! # Concurrency
//! `revoke_token` is the serialization point for concurrent rotations:
//! it must only succeed while the record is unrevoked, as a single
//! atomic storage-level update. Two racing refresh calls on the same
//! token therefore resolve to exactly one winner.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token ledger operations
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a newly issued refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (duplicate digest or storage error)
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by its token digest
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Record found
    /// * `Ok(None)` - No record with the given digest
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Revoke a record if and only if it is currently unrevoked
    ///
    /// # Arguments
    /// * `token_hash` - Digest of the token to revoke
    /// * `replaced_by` - Id of the record minted by the rotation that is
    ///   consuming this token, if any
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the revocation
    /// * `Ok(false)` - The record was absent or already revoked
    /// * `Err(DomainError)` - Storage error occurred
    async fn revoke_token(
        &self,
        token_hash: &str,
        replaced_by: Option<Uuid>,
    ) -> Result<bool, DomainError>;

    /// Revoke every unrevoked record owned by the user
    ///
    /// Used during a global logout; one logical bulk operation.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    /// * `Err(DomainError)` - Storage error occurred
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
