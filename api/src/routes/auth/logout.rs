use actix_web::{web, HttpResponse};

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::dto::auth::{LogoutResponse, RefreshTokenRequest};
use crate::handlers::error_handler::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/logout
///
/// Revokes a single refresh token. Logout is deliberately not
/// idempotent: a second call with the same token gets a 401, because by
/// then the token is indistinguishable from any other revoked or unknown
/// token.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{"success":true,"data":{"message":"Logged out successfully"}}`
/// - 400 Bad Request: blank token
/// - 401 Unauthorized: token unknown or already revoked
pub async fn logout<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })),
        Err(error) => handle_domain_error(error),
    }
}
