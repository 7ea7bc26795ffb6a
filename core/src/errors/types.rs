//! Domain-specific error types for authentication and token operations
//!
//! The variants classify failures for the boundary translator; the
//! messages carried here are generic by design, and the API layer
//! flattens the 401-class further so a caller cannot learn which check
//! rejected a credential or token.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    /// The ledger has no record for the presented digest, or the record
    /// was already revoked; the two cases are indistinguishable on purpose
    #[error("Refresh token revoked or unknown")]
    RefreshTokenRevokedOrUnknown,

    /// Ledger-side expiry, independent of the signed `exp` claim
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            TokenError::RefreshTokenRevokedOrUnknown.to_string(),
            "Refresh token revoked or unknown"
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_transparent_bridging() {
        let error: DomainError = TokenError::TokenRevoked.into();
        assert_eq!(error.to_string(), "Token revoked");

        let error: DomainError = AuthError::EmailAlreadyRegistered.into();
        assert_eq!(error.to_string(), "Email already registered");
    }
}
