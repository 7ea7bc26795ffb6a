//! Main token service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshTokenRecord, TokenPair, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for signing, verifying, and hashing tokens, and for accessing
/// the refresh-token ledger
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh-token ledger for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;

        Self {
            repository,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        }
    }

    /// Issues a new access/refresh token pair for a user and persists the
    /// refresh token's ledger record
    ///
    /// Claims are taken from the user's current state, including the
    /// current `token_version`.
    ///
    /// # Returns
    ///
    /// * `Ok((TokenPair, RefreshTokenRecord))` - The pair and the saved record
    /// * `Err(DomainError)` - Signing or storage failed
    pub async fn issue_pair(
        &self,
        user: &User,
    ) -> Result<(TokenPair, RefreshTokenRecord), DomainError> {
        let access_token = self.sign_access_token(user)?;
        let refresh_token = self.sign_refresh_token(user)?;

        let expires_at = Utc::now() + Duration::seconds(self.config.refresh_token_expiry_secs);
        let record = RefreshTokenRecord::new(user.id, self.hash_token(&refresh_token), expires_at);
        let record = self.repository.save_refresh_token(record).await?;

        let pair = TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_secs,
            self.config.refresh_token_expiry_secs,
        );

        Ok((pair, record))
    }

    /// Signs an access token for the user's current state
    pub fn sign_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::for_user(user, self.config.access_token_expiry_secs);
        self.encode_jwt(&claims, &self.access_encoding_key)
    }

    /// Signs a refresh token for the user's current state
    pub fn sign_refresh_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::for_user(user, self.config.refresh_token_expiry_secs);
        self.encode_jwt(&claims, &self.refresh_encoding_key)
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if the signature and expiry hold
    /// * `Err(DomainError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_jwt(token, &self.access_decoding_key)
    }

    /// Verifies a refresh token's signature and signed expiry
    ///
    /// The ledger is not consulted here; revocation and ledger expiry are
    /// the session engine's checks.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_jwt(token, &self.refresh_decoding_key)
    }

    /// Hashes a raw token for ledger storage and lookup
    ///
    /// Deterministic by construction: the same raw token always yields the
    /// same digest, which is what makes ledger lookups work.
    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Finds the ledger record for a raw refresh token
    pub async fn find_refresh_record(
        &self,
        raw_token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let token_hash = self.hash_token(raw_token);
        self.repository.find_refresh_token(&token_hash).await
    }

    /// Revokes the ledger record for a raw refresh token, if unrevoked
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call performed the revocation
    /// * `Ok(false)` - The record was absent or already revoked
    pub async fn revoke_refresh_token(
        &self,
        raw_token: &str,
        replaced_by: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let token_hash = self.hash_token(raw_token);
        self.repository.revoke_token(&token_hash, replaced_by).await
    }

    /// Revokes every unrevoked ledger record owned by the user
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_user_tokens(user_id).await
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims, key: &EncodingKey) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Decodes a JWT against the given key, classifying the failure
    fn decode_jwt(&self, token: &str, key: &DecodingKey) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            }
        })?;

        Ok(token_data.claims)
    }
}
