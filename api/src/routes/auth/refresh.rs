use actix_web::{web, HttpResponse};

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::dto::auth::{RefreshResponse, RefreshTokenRequest};
use crate::handlers::error_handler::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/refresh
///
/// Exchanges a refresh token for a new access/refresh pair. The
/// presented token is single-use: it is revoked the moment the rotation
/// succeeds, and replaying it afterwards yields a 401.
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
/// - 200 OK: `{"success":true,"data":{"tokens":...}}`
/// - 400 Bad Request: blank token
/// - 401 Unauthorized: invalid signature, revoked, unknown, expired, or
///   stale token version
pub async fn refresh<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(ApiResponse::success(RefreshResponse { tokens })),
        Err(error) => handle_domain_error(error),
    }
}
