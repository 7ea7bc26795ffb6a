//! Main authentication service implementation
//!
//! Orchestrates the session lifecycle against the credential store and
//! the refresh-token ledger. Each refresh token moves through
//! Issued -> Active -> {Rotated | Revoked | Expired}; the terminal states
//! have no outgoing transitions.

use std::sync::Arc;

use uuid::Uuid;

use ag_shared::utils::validation::{is_valid_email, normalize_email};

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Authentication service for the complete session lifecycle
pub struct AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    /// User repository for credential storage
    user_repository: Arc<U>,
    /// Token service for signing and ledger access
    token_service: Arc<TokenService<T>>,
    /// Password hashing boundary
    password_hasher: Arc<P>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, P> AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        password_hasher: Arc<P>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            config,
        }
    }

    /// Register a new account and issue its first token pair
    ///
    /// # Arguments
    ///
    /// * `email` - Email address; normalized (trimmed, lowercased) before
    ///   any validation or lookup
    /// * `password` - Plaintext password, at least the configured minimum
    /// * `role` - Optional role string; defaults to `user`
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Sanitized user plus access/refresh tokens
    /// * `Err(DomainError)` - Validation failure, duplicate email, or
    ///   storage/signing error
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if password.len() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let role = match role {
            Some(raw) => raw
                .parse::<UserRole>()
                .map_err(|_| ValidationError::InvalidRole {
                    role: raw.to_string(),
                })?,
            None => UserRole::default(),
        };

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash, role))
            .await?;

        let (tokens, _) = self.token_service.issue_pair(&user).await?;
        tracing::debug!(user_id = %user.id, "registered new user");

        Ok(AuthResponse::new(user.to_public(), tokens))
    }

    /// Authenticate with email and password and issue a fresh token pair
    ///
    /// Unknown email and wrong password return the identical error, so the
    /// response never reveals whether an account exists.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials.into()),
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let (tokens, _) = self.token_service.issue_pair(&user).await?;
        tracing::debug!(user_id = %user.id, "login succeeded");

        Ok(AuthResponse::new(user.to_public(), tokens))
    }

    /// Exchange a refresh token for a new pair, rotating the old one out
    ///
    /// The presented token is single-use: once this call starts revoking
    /// it, it can never pass validation again. The new pair is minted from
    /// the user's current state, so a stale `token_version` in the claim
    /// never propagates.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The replacement pair (no user payload)
    /// * `Err(DomainError)` - Any lifecycle check failed
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        if refresh_token.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "refreshToken".to_string(),
            }
            .into());
        }

        let claims = self.token_service.verify_refresh_token(refresh_token)?;

        let record = self
            .token_service
            .find_refresh_record(refresh_token)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown))?;
        if record.is_revoked() {
            return Err(TokenError::RefreshTokenRevokedOrUnknown.into());
        }
        // Ledger expiry is checked on its own, independent of the signed
        // exp the codec already enforced.
        if record.is_expired() {
            return Err(TokenError::RefreshTokenExpired.into());
        }

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;
        let user = match self.user_repository.find_by_id(user_id).await? {
            Some(user) => user,
            None => {
                // The subject is gone; the presented token is dead weight.
                let _ = self
                    .token_service
                    .revoke_refresh_token(refresh_token, None)
                    .await;
                return Err(AuthError::UserNotFound.into());
            }
        };

        if claims.token_version != user.token_version {
            let _ = self
                .token_service
                .revoke_refresh_token(refresh_token, None)
                .await;
            tracing::warn!(user_id = %user.id, "refresh token carried a stale token version");
            return Err(TokenError::TokenRevoked.into());
        }

        // Rotate: mint the replacement first, then consume the old record.
        let (pair, new_record) = self.token_service.issue_pair(&user).await?;

        // The conditional revoke decides the winner between concurrent
        // rotations of the same token.
        let revoked = self
            .token_service
            .revoke_refresh_token(refresh_token, Some(new_record.id))
            .await?;
        if !revoked {
            // Lost the race; withdraw the pair minted above.
            let _ = self
                .token_service
                .revoke_refresh_token(&pair.refresh_token, None)
                .await;
            return Err(TokenError::RefreshTokenRevokedOrUnknown.into());
        }

        tracing::debug!(user_id = %user.id, "rotated refresh token");
        Ok(pair)
    }

    /// Revoke a single refresh token
    ///
    /// Calling logout twice with the same token yields success then
    /// `RefreshTokenRevokedOrUnknown`; success is not repeatable.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        if refresh_token.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "refreshToken".to_string(),
            }
            .into());
        }

        let revoked = self
            .token_service
            .revoke_refresh_token(refresh_token, None)
            .await?;
        if !revoked {
            return Err(TokenError::RefreshTokenRevokedOrUnknown.into());
        }

        Ok(())
    }

    /// Revoke every outstanding session for a user
    ///
    /// Increments the user's token version by exactly one and revokes all
    /// of their unrevoked ledger records. Outstanding access tokens die
    /// indirectly: the gate's version comparison rejects them on the next
    /// request.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of refresh tokens revoked
    /// * `Err(DomainError)` - `NotFound` if the user is absent
    pub async fn logout_all(&self, user_id: Uuid) -> DomainResult<usize> {
        let new_version = self
            .user_repository
            .increment_token_version(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;

        let revoked = self.token_service.revoke_all_for_user(user_id).await?;
        tracing::debug!(
            user_id = %user_id,
            new_version,
            revoked,
            "revoked all sessions"
        );

        Ok(revoked)
    }

    /// Verify an access token against current user state
    ///
    /// This is the whole of the authentication gate: signature and expiry
    /// through the codec, then the mandatory token-version comparison
    /// against a fresh read of the user row. Every failure collapses to
    /// `Unauthorized`; storage errors alone surface as `Internal`.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<Claims> {
        let claims = self
            .token_service
            .verify_access_token(access_token)
            .map_err(|_| DomainError::Unauthorized)?;

        let user_id = claims.user_id().map_err(|_| DomainError::Unauthorized)?;
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if claims.token_version != user.token_version {
            return Err(DomainError::Unauthorized);
        }

        Ok(claims)
    }
}
