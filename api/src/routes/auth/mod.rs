//! Authentication route handlers
//!
//! Registration, login, refresh-token rotation, single-token logout, and
//! global logout.

pub mod login;
pub mod logout;
pub mod logout_all;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use ag_core::repositories::{TokenRepository, UserRepository};
use ag_core::services::auth::{AuthService, PasswordHasher};

/// Application state shared by all handlers
pub struct AppState<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, T, P>>,
}
