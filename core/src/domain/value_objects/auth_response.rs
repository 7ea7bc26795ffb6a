//! Authentication response returned by register and login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::PublicUser;

/// Sanitized user plus a fresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

impl AuthResponse {
    pub fn new(user: PublicUser, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
