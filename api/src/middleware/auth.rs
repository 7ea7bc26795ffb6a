//! Authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer access token from the Authorization header and
//! verifies it against current user state through the session service:
//! signature, expiry, and the token-version comparison all run on every
//! protected request, never from a cache. The verified identity is then
//! injected into the request extensions for downstream handlers and the
//! role gate.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use ag_core::domain::entities::token::Claims;
use ag_core::domain::entities::user::UserRole;
use ag_core::errors::{DomainError, DomainResult};
use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::{AuthService, PasswordHasher};

use crate::handlers::ApiError;

/// Verified identity attached to authenticated requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the verified claims
    pub user_id: Uuid,
    /// Account email at issuance time
    pub email: String,
    /// Role checked by the RBAC gate
    pub role: UserRole,
    /// Token version the gate matched against the user row
    pub token_version: i32,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims.user_id().map_err(|_| DomainError::Unauthorized)?;
        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
            token_version: claims.token_version,
            jti: claims.jti,
        })
    }
}

/// Access-token verification behind dynamic dispatch, so the middleware
/// does not carry the session service's generic parameters
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> DomainResult<Claims>;
}

#[async_trait]
impl<U, T, P> Authenticator for AuthService<U, T, P>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    P: PasswordHasher + 'static,
{
    async fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        AuthService::authenticate(self, token).await
    }
}

/// Authentication middleware factory
pub struct AccessAuth;

impl AccessAuth {
    /// Creates a new authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccessAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Authentication middleware service
pub struct AccessAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // A missing header, wrong scheme, or empty credential all
            // collapse to the same 401.
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(ApiError::unauthorized().into()),
            };

            let authenticator = match req.app_data::<web::Data<Arc<dyn Authenticator>>>() {
                Some(authenticator) => authenticator.clone(),
                None => {
                    log::error!("Authenticator missing from app data");
                    return Err(ApiError::internal().into());
                }
            };

            let claims = match authenticator.authenticate(&token).await {
                Ok(claims) => claims,
                Err(DomainError::Internal { message }) => {
                    log::error!("Authentication hit a storage error: {}", message);
                    return Err(ApiError::internal().into());
                }
                Err(_) => return Err(ApiError::unauthorized().into()),
            };

            let context = match AuthContext::from_claims(claims) {
                Ok(context) => context,
                Err(_) => return Err(ApiError::unauthorized().into()),
            };
            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let token = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized().into());

        ready(result)
    }
}
