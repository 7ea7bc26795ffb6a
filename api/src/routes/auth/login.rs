use actix_web::{web, HttpResponse, ResponseError};
use validator::Validate;

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error_handler::{handle_domain_error, ApiError};

use super::AppState;

/// Handler for POST /auth/login
///
/// Authenticates with email and password and returns the sanitized user
/// plus a fresh token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@mail.com",
///     "password": "Password123!"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{"success":true,"data":{"user":...,"tokens":...}}`
/// - 400 Bad Request: missing email or password
/// - 401 Unauthorized: unknown email or wrong password, indistinguishably
pub async fn login<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(ApiResponse::success(response)),
        Err(error) => handle_domain_error(error),
    }
}
