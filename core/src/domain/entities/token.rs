//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};

/// JWT issuer
pub const JWT_ISSUER: &str = "authgate";

/// Claims structure shared by access and refresh tokens
///
/// Tokens are immutable once issued; revocation happens through the
/// refresh-token ledger and the user's `token_version`, never by editing
/// a live claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Account email at issuance time
    pub email: String,

    /// Account role at issuance time
    pub role: UserRole,

    /// User token version at issuance time
    pub token_version: i32,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, unique per issuance
    pub jti: String,
}

impl Claims {
    /// Creates claims for a user with the given lifetime in seconds
    ///
    /// A fresh `jti` is stamped on every issuance so two tokens minted
    /// from identical user state within the same second still hash to
    /// different ledger keys.
    pub fn for_user(user: &User, expiry_secs: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_secs);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            token_version: user.token_version,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token ledger record stored in the database
///
/// One row per issued refresh token. Created on register/login/refresh,
/// revoked at most once, never deleted; a record once revoked never
/// un-revokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// SHA-256 digest of the raw token; the raw value is never persisted
    pub token_hash: String,

    /// Ledger-side expiry, enforced independently of the signed `exp`
    pub expires_at: DateTime<Utc>,

    /// Set exactly once, when the token is consumed or revoked
    pub revoked_at: Option<DateTime<Utc>>,

    /// Record minted by the rotation that consumed this one
    pub replaced_by: Option<Uuid>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new unrevoked record
    pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            revoked_at: None,
            replaced_by: None,
            created_at: Utc::now(),
        }
    }

    /// Checks if the record has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks if the ledger expiry has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the token is still usable as a credential
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Revokes the record, optionally linking its replacement
    ///
    /// A no-op on an already revoked record; the first revocation wins.
    pub fn revoke(&mut self, replaced_by: Option<Uuid>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(Utc::now());
            self.replaced_by = replaced_by;
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
