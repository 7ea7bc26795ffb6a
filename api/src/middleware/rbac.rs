//! Role-based access control middleware.
//!
//! Runs after the authentication gate and rejects authenticated
//! identities whose role is outside a fixed allow-set. A request that
//! reaches this gate without an `AuthContext` is a wiring mistake and is
//! rejected as unauthorized rather than forbidden.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use ag_core::domain::entities::user::UserRole;

use super::auth::AuthContext;
use crate::handlers::ApiError;

/// Role gate middleware factory with a fixed allow-set
pub struct RequireRole {
    allowed: Rc<Vec<UserRole>>,
}

impl RequireRole {
    /// Creates a role gate admitting only the given roles
    pub fn new(allowed: &[UserRole]) -> Self {
        Self {
            allowed: Rc::new(allowed.to_vec()),
        }
    }

    /// Shorthand for admin-only routes
    pub fn admin() -> Self {
        Self::new(&[UserRole::Admin])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

/// Role gate middleware service
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<Vec<UserRole>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = Rc::clone(&self.allowed);

        Box::pin(async move {
            let role = req.extensions().get::<AuthContext>().map(|ctx| ctx.role);

            match role {
                None => Err(ApiError::unauthorized().into()),
                Some(role) if !allowed.contains(&role) => Err(ApiError::forbidden().into()),
                Some(_) => service.call(req).await,
            }
        })
    }
}
