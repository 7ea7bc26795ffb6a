//! Maps domain errors onto HTTP responses.
//!
//! This is the single translation point from typed domain failures to
//! status codes and client-safe messages. All 401-class token failures
//! share one generic message, and login failures share another, so a
//! caller can never learn which specific check rejected a credential or
//! token.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::types::response::ApiResponse;

/// HTTP-facing error carrying a status code and a client-safe message
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Uniform 401 for every token failure on protected routes
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Invalid or expired token")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden")
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ApiResponse::<()>::error(self.message.clone()))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match &error {
            DomainError::Validation { message } => ApiError::bad_request(message.clone()),
            DomainError::ValidationErr(e) => ApiError::bad_request(e.to_string()),
            DomainError::NotFound { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "User not found")
            }
            DomainError::Unauthorized => ApiError::unauthorized(),
            DomainError::Auth(AuthError::InvalidCredentials) => {
                ApiError::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            DomainError::Auth(AuthError::EmailAlreadyRegistered) => {
                ApiError::new(StatusCode::CONFLICT, "Email already registered")
            }
            // During refresh a vanished subject renders the token dead;
            // externally that is just another 401.
            DomainError::Auth(AuthError::UserNotFound) => ApiError::unauthorized(),
            DomainError::Auth(AuthError::InsufficientPermissions) => ApiError::forbidden(),
            DomainError::Token(TokenError::TokenGenerationFailed) => {
                log::error!("Token generation failed");
                ApiError::internal()
            }
            DomainError::Token(_) => ApiError::unauthorized(),
            DomainError::Internal { message } => {
                log::error!("Internal error: {}", message);
                ApiError::internal()
            }
        }
    }
}

/// Translate a domain error into an HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}
