use actix_web::{web, HttpResponse};

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::dto::auth::LogoutResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /auth/logout-all
///
/// Revokes every outstanding session for the authenticated user by
/// bumping their token version and revoking all unrevoked ledger
/// records. Previously issued access tokens die at the gate on their
/// next request; refresh tokens die on their next use.
///
/// Requires a bearer access token; the target user is always the caller.
///
/// # Responses
/// - 200 OK: `{"success":true,"data":{"message":"Logged out from all sessions"}}`
/// - 401 Unauthorized: missing or invalid bearer token
/// - 404 Not Found: the authenticated user no longer exists
pub async fn logout_all<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.logout_all(auth.user_id).await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::success(LogoutResponse {
            message: "Logged out from all sessions".to_string(),
        })),
        Err(error) => handle_domain_error(error),
    }
}
