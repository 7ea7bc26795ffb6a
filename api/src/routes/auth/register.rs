use actix_web::{web, HttpResponse, ResponseError};
use validator::Validate;

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error_handler::{handle_domain_error, ApiError};

use super::AppState;

/// Handler for POST /auth/register
///
/// Creates an account and returns the sanitized user plus an initial
/// access/refresh token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@mail.com",
///     "password": "Password123!",
///     "role": "user"
/// }
/// ```
///
/// # Responses
/// - 201 Created: `{"success":true,"data":{"user":...,"tokens":...}}`
/// - 400 Bad Request: malformed email or password shorter than 6 characters
/// - 409 Conflict: email already registered (any casing variant)
pub async fn register<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    if let Err(errors) = request.0.validate() {
        return ApiError::bad_request(format!("Invalid request: {}", errors)).error_response();
    }

    match state
        .auth_service
        .register(&request.email, &request.password, request.role.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Created().json(ApiResponse::success(response)),
        Err(error) => handle_domain_error(error),
    }
}
