//! HTTP middleware: authentication gate, role gate, CORS.

pub mod auth;
pub mod cors;
pub mod rbac;

pub use auth::{AccessAuth, AuthContext, Authenticator};
pub use rbac::RequireRole;
