//! Application state and factory
//!
//! This module builds the actix-web application: middleware, routes, and
//! shared state. The authentication gate is wired per-route so the auth
//! endpoints stay public while `/auth/logout-all` and everything under
//! `/users` require a verified bearer token.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, Error, HttpResponse};

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::PasswordHasher;
use ag_shared::types::response::ApiResponse;

use crate::middleware::auth::{AccessAuth, Authenticator};
use crate::middleware::cors::create_cors;
use crate::middleware::rbac::RequireRole;
use crate::routes::auth::{login, logout, logout_all, refresh, register, AppState};
use crate::routes::users;

/// Create and configure the application with all dependencies
pub fn create_app<U, T, P>(
    app_state: web::Data<AppState<U, T, P>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    // The middleware reaches the session service through dynamic
    // dispatch; handlers keep the concrete generic state.
    let authenticator: Arc<dyn Authenticator> = app_state.auth_service.clone();

    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::register::<U, T, P>))
                .route("/login", web::post().to(login::login::<U, T, P>))
                .route("/refresh", web::post().to(refresh::refresh::<U, T, P>))
                .route("/logout", web::post().to(logout::logout::<U, T, P>))
                .service(
                    web::resource("/logout-all")
                        .route(web::post().to(logout_all::logout_all::<U, T, P>))
                        .wrap(AccessAuth::new()),
                ),
        )
        // User routes, all behind the authentication gate
        .service(
            web::scope("/users")
                .service(
                    web::resource("")
                        .route(web::get().to(users::viewer))
                        .wrap(AccessAuth::new()),
                )
                .service(
                    // Registration order matters: the role gate must see
                    // the context the authentication gate attaches, and
                    // actix runs route middleware in reverse registration
                    // order.
                    web::resource("/admin-only")
                        .route(web::get().to(users::admin_only))
                        .wrap(RequireRole::admin())
                        .wrap(AccessAuth::new()),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "authgate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "The requested resource was not found",
    ))
}
