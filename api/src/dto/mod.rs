//! Request and response payloads for the HTTP surface.

pub mod auth;

pub use auth::{LoginRequest, LogoutResponse, RefreshResponse, RefreshTokenRequest, RegisterRequest};
