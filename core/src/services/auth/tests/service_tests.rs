//! Unit tests for the session lifecycle engine

use chrono::{Duration, Utc};

use super::mocks::{harness, harness_with, TestHarness};
use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenServiceConfig;

async fn register_alice(h: &TestHarness) -> crate::domain::value_objects::AuthResponse {
    h.auth_service
        .register("alice@mail.com", "Password123!", None)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_creates_user_and_tokens() {
    let h = harness();

    let response = register_alice(&h).await;

    assert_eq!(response.user.email, "alice@mail.com");
    assert_eq!(response.user.role, UserRole::User);
    assert!(!response.tokens.access_token.is_empty());
    assert!(!response.tokens.refresh_token.is_empty());

    // Both tokens decode back to the fresh user with version 1.
    let claims = h
        .token_service
        .verify_access_token(&response.tokens.access_token)
        .unwrap();
    assert_eq!(claims.sub, response.user.id.to_string());
    assert_eq!(claims.token_version, 1);
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let h = harness();

    let response = h
        .auth_service
        .register("  Alice@Mail.COM  ", "Password123!", None)
        .await
        .unwrap();
    assert_eq!(response.user.email, "alice@mail.com");

    // Any casing or whitespace variant of the same address now conflicts.
    let result = h
        .auth_service
        .register("ALICE@mail.com", "Password123!", None)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailAlreadyRegistered)
    ));
}

#[tokio::test]
async fn test_register_rejects_empty_email() {
    let h = harness();
    let result = h.auth_service.register("   ", "Password123!", None).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let h = harness();
    let result = h
        .auth_service
        .register("not-an-email", "Password123!", None)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::InvalidEmail)
    ));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let h = harness();
    let result = h.auth_service.register("alice@mail.com", "12345", None).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::PasswordTooShort { min: 6 })
    ));
}

#[tokio::test]
async fn test_register_rejects_unknown_role() {
    let h = harness();
    let result = h
        .auth_service
        .register("alice@mail.com", "Password123!", Some("superuser"))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::InvalidRole { .. })
    ));
}

#[tokio::test]
async fn test_register_with_admin_role() {
    let h = harness();
    let response = h
        .auth_service
        .register("admin@mail.com", "Password123!", Some("admin"))
        .await
        .unwrap();
    assert_eq!(response.user.role, UserRole::Admin);
}

#[tokio::test]
async fn test_login_succeeds_with_correct_credentials() {
    let h = harness();
    let registered = register_alice(&h).await;

    let response = h
        .auth_service
        .login("alice@mail.com", "Password123!")
        .await
        .unwrap();

    assert_eq!(response.user.id, registered.user.id);
    assert!(!response.tokens.access_token.is_empty());
    assert!(!response.tokens.refresh_token.is_empty());

    let claims = h
        .token_service
        .verify_access_token(&response.tokens.access_token)
        .unwrap();
    assert_eq!(claims.sub, registered.user.id.to_string());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    register_alice(&h).await;

    // Wrong password for a known account...
    let wrong_password = h
        .auth_service
        .login("alice@mail.com", "WrongPassword")
        .await
        .unwrap_err();
    // ...and a completely unknown account.
    let unknown_email = h
        .auth_service
        .login("nobody@mail.com", "Password123!")
        .await
        .unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        unknown_email,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let h = harness();

    assert!(matches!(
        h.auth_service.login("", "pw").await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
    assert!(matches!(
        h.auth_service.login("alice@mail.com", "").await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_refresh_rotates_and_consumes_the_old_token() {
    let h = harness();
    let registered = register_alice(&h).await;
    let old_refresh = registered.tokens.refresh_token.clone();

    let pair = h.auth_service.refresh(&old_refresh).await.unwrap();
    assert!(!pair.access_token.is_empty());
    assert_ne!(pair.refresh_token, old_refresh);

    // The consumed record is revoked and points at its replacement.
    let old_record = h
        .token_service
        .find_refresh_record(&old_refresh)
        .await
        .unwrap()
        .unwrap();
    let new_record = h
        .token_service
        .find_refresh_record(&pair.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(old_record.is_revoked());
    assert_eq!(old_record.replaced_by, Some(new_record.id));
    assert!(new_record.is_active());

    // Replaying the old token fails; the new one still works.
    let replay = h.auth_service.refresh(&old_refresh).await;
    assert!(matches!(
        replay.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown)
    ));
    h.auth_service.refresh(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rejects_blank_token() {
    let h = harness();
    let result = h.auth_service.refresh("  ").await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_refresh_rejects_forged_token() {
    let h = harness();
    register_alice(&h).await;

    let result = h.auth_service.refresh("definitely-not-a-jwt").await;
    assert!(matches!(result.unwrap_err(), DomainError::Token(_)));
}

#[tokio::test]
async fn test_refresh_rejects_token_missing_from_ledger() {
    let h = harness();
    let registered = register_alice(&h).await;

    // A token with a valid signature whose record was never persisted:
    // sign against the same secrets through a second service with an
    // empty ledger.
    let other = harness();
    let foreign = other
        .auth_service
        .register("bob@mail.com", "Password123!", None)
        .await
        .unwrap();

    let result = h.auth_service.refresh(&foreign.tokens.refresh_token).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown)
    ));

    // The original token is untouched by the failed attempt.
    h.auth_service
        .refresh(&registered.tokens.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_enforces_ledger_expiry_independently() {
    let h = harness();
    let registered = register_alice(&h).await;
    let raw = registered.tokens.refresh_token.clone();

    // Backdate the ledger expiry while the signed exp stays 7 days out.
    let hash = h.token_service.hash_token(&raw);
    {
        let mut records = h.token_repository.records.write().await;
        records.get_mut(&hash).unwrap().expires_at = Utc::now() - Duration::hours(1);
    }

    let result = h.auth_service.refresh(&raw).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenExpired)
    ));
}

#[tokio::test]
async fn test_refresh_enforces_signed_expiry_independently() {
    // Sign refresh tokens already expired while their ledger records stay
    // valid for a week.
    let h = harness_with(TokenServiceConfig {
        refresh_token_expiry_secs: -120,
        ..Default::default()
    });
    let registered = register_alice(&h).await;
    let raw = registered.tokens.refresh_token.clone();

    // Push the ledger expiry forward so only the signature check can fire.
    let hash = h.token_service.hash_token(&raw);
    {
        let mut records = h.token_repository.records.write().await;
        records.get_mut(&hash).unwrap().expires_at = Utc::now() + Duration::days(7);
    }

    let result = h.auth_service.refresh(&raw).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[tokio::test]
async fn test_refresh_rejects_stale_token_version_and_revokes() {
    let h = harness();
    let registered = register_alice(&h).await;
    let raw = registered.tokens.refresh_token.clone();

    // Bump the version out from under the outstanding token.
    h.user_repository
        .increment_token_version(registered.user.id)
        .await
        .unwrap();

    let result = h.auth_service.refresh(&raw).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenRevoked)
    ));

    // The mismatch revoked the presented token as a side effect.
    let record = h
        .token_service
        .find_refresh_record(&raw)
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_revoked());
}

#[tokio::test]
async fn test_refresh_for_deleted_user_revokes_token() {
    let h = harness();
    let registered = register_alice(&h).await;
    let raw = registered.tokens.refresh_token.clone();

    h.user_repository
        .users
        .write()
        .await
        .remove(&registered.user.id);

    let result = h.auth_service.refresh(&raw).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserNotFound)
    ));

    let record = h
        .token_service
        .find_refresh_record(&raw)
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_revoked());
}

#[tokio::test]
async fn test_logout_is_single_use() {
    let h = harness();
    let registered = register_alice(&h).await;
    let raw = registered.tokens.refresh_token.clone();

    h.auth_service.logout(&raw).await.unwrap();

    // Second logout with the same token: revoked-or-unknown, not success.
    let second = h.auth_service.logout(&raw).await;
    assert!(matches!(
        second.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown)
    ));

    // And the token is dead for refresh purposes too.
    let refresh = h.auth_service.refresh(&raw).await;
    assert!(matches!(
        refresh.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown)
    ));
}

#[tokio::test]
async fn test_logout_rejects_blank_and_unknown_tokens() {
    let h = harness();

    assert!(matches!(
        h.auth_service.logout("").await.unwrap_err(),
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
    assert!(matches!(
        h.auth_service.logout("unknown-token").await.unwrap_err(),
        DomainError::Token(TokenError::RefreshTokenRevokedOrUnknown)
    ));
}

#[tokio::test]
async fn test_logout_all_kills_every_outstanding_token() {
    let h = harness();
    let registered = register_alice(&h).await;
    let login = h
        .auth_service
        .login("alice@mail.com", "Password123!")
        .await
        .unwrap();

    let revoked = h.auth_service.logout_all(registered.user.id).await.unwrap();
    assert_eq!(revoked, 2);

    // Every previously issued access token fails the gate...
    for access in [
        &registered.tokens.access_token,
        &login.tokens.access_token,
    ] {
        let result = h.auth_service.authenticate(access).await;
        assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
    }

    // ...and every refresh token is unusable on next use.
    for refresh in [
        &registered.tokens.refresh_token,
        &login.tokens.refresh_token,
    ] {
        let result = h.auth_service.refresh(refresh).await;
        assert!(matches!(result.unwrap_err(), DomainError::Token(_)));
    }

    // A fresh login works and its tokens carry the bumped version.
    let after = h
        .auth_service
        .login("alice@mail.com", "Password123!")
        .await
        .unwrap();
    let claims = h
        .auth_service
        .authenticate(&after.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.token_version, 2);
}

#[tokio::test]
async fn test_logout_all_unknown_user() {
    let h = harness();
    let result = h.auth_service.logout_all(uuid::Uuid::new_v4()).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_authenticate_accepts_live_token() {
    let h = harness();
    let registered = register_alice(&h).await;

    let claims = h
        .auth_service
        .authenticate(&registered.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.sub, registered.user.id.to_string());
    assert_eq!(claims.email, "alice@mail.com");
}

#[tokio::test]
async fn test_authenticate_rejects_garbage_and_refresh_tokens() {
    let h = harness();
    let registered = register_alice(&h).await;

    assert!(matches!(
        h.auth_service.authenticate("garbage").await.unwrap_err(),
        DomainError::Unauthorized
    ));
    // A refresh token is signed with the other secret and must not pass
    // the access gate.
    assert!(matches!(
        h.auth_service
            .authenticate(&registered.tokens.refresh_token)
            .await
            .unwrap_err(),
        DomainError::Unauthorized
    ));
}

#[tokio::test]
async fn test_authenticate_rejects_stale_version() {
    let h = harness();
    let registered = register_alice(&h).await;

    h.user_repository
        .increment_token_version(registered.user.id)
        .await
        .unwrap();

    let result = h
        .auth_service
        .authenticate(&registered.tokens.access_token)
        .await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}
