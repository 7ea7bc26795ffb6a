//! Mock implementations and fixtures for authentication service tests

use std::sync::Arc;

use crate::errors::DomainResult;
use crate::repositories::token_repository::mock::MockTokenRepository;
use crate::repositories::user_repository::mock::MockUserRepository;
use crate::services::auth::{AuthService, AuthServiceConfig, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Reversible stand-in for the password hasher; real hashing is an
/// infrastructure concern and irrelevant to lifecycle semantics
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        Ok(format!("hashed::{}", plain))
    }

    fn verify(&self, plain: &str, hash: &str) -> DomainResult<bool> {
        Ok(hash == format!("hashed::{}", plain))
    }
}

pub type TestAuthService = AuthService<MockUserRepository, MockTokenRepository, MockPasswordHasher>;

/// Fixture bundling the service with handles to its repositories
pub struct TestHarness {
    pub auth_service: TestAuthService,
    pub user_repository: Arc<MockUserRepository>,
    pub token_repository: Arc<MockTokenRepository>,
    pub token_service: Arc<TokenService<MockTokenRepository>>,
}

/// Builds a service wired to fresh in-memory repositories
pub fn harness() -> TestHarness {
    harness_with(TokenServiceConfig::default())
}

/// Same as [`harness`], with a custom token configuration
pub fn harness_with(config: TokenServiceConfig) -> TestHarness {
    let user_repository = Arc::new(MockUserRepository::new());
    let token_repository = Arc::new(MockTokenRepository::new());
    let token_service = Arc::new(TokenService::new(token_repository.clone(), config));

    let auth_service = AuthService::new(
        user_repository.clone(),
        token_service.clone(),
        Arc::new(MockPasswordHasher),
        AuthServiceConfig::default(),
    );

    TestHarness {
        auth_service,
        user_repository,
        token_repository,
        token_service,
    }
}
