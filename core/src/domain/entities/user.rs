//! User entity representing a registered account in the AuthGate system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account, checked by the RBAC gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular authenticated user
    User,
    /// Administrator with access to restricted routes
    Admin,
}

impl UserRole {
    /// String form stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// User entity owned by the credential store
///
/// Mutated in exactly two ways: creation, and bumping `token_version`
/// during a global logout. Never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email address, unique per account
    pub email: String,

    /// One-way password hash; never serialized to clients
    pub password_hash: String,

    /// Role granted at registration
    pub role: UserRole,

    /// Per-user counter embedded in token claims; incrementing it
    /// invalidates every previously issued token without enumerating them
    pub token_version: i32,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance with the initial token version
    pub fn new(email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role,
            token_version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Increments the token version, invalidating all outstanding tokens
    pub fn bump_token_version(&mut self) {
        self.token_version += 1;
        self.updated_at = Utc::now();
    }

    /// Checks if the user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Returns the sanitized projection safe to send to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Client-facing view of a user; the password hash never leaves the
/// service boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
