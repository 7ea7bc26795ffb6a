//! User route handlers: viewer info and the admin-only RBAC route.

use actix_web::HttpResponse;
use serde::Serialize;
use uuid::Uuid;

use ag_core::domain::entities::user::UserRole;
use ag_shared::types::response::ApiResponse;

use crate::middleware::auth::AuthContext;

/// Viewer identity echoed back to authenticated callers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerInfo {
    id: Uuid,
    email: String,
    role: UserRole,
}

#[derive(Debug, Serialize)]
struct ViewerResponse {
    message: String,
    viewer: ViewerInfo,
}

#[derive(Debug, Serialize)]
struct AdminResponse {
    ok: bool,
    message: String,
}

/// Handler for GET /users
///
/// Returns the verified identity the authentication gate attached to the
/// request.
pub async fn viewer(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(ViewerResponse {
        message: "Users route working".to_string(),
        viewer: ViewerInfo {
            id: auth.user_id,
            email: auth.email,
            role: auth.role,
        },
    }))
}

/// Handler for GET /users/admin-only
///
/// Reached only when the role gate admitted an admin.
pub async fn admin_only(_auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(AdminResponse {
        ok: true,
        message: "Admin access granted".to_string(),
    }))
}
