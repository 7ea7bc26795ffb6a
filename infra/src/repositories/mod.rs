//! In-memory repository implementations for tests.
//!
//! These mirror the storage semantics of the MySQL repositories,
//! including the conditional-revoke contract, without a database, and
//! back the API integration tests. They are not a production storage
//! path.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ag_core::domain::entities::token::RefreshTokenRecord;
use ag_core::domain::entities::user::User;
use ag_core::errors::{AuthError, DomainError};
use ag_core::repositories::{TokenRepository, UserRepository};

/// In-memory user repository
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn increment_token_version(&self, user_id: Uuid) -> Result<Option<i32>, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user_id) {
            Some(user) => {
                user.bump_token_version();
                Ok(Some(user.token_version))
            }
            None => Ok(None),
        }
    }
}

/// In-memory refresh-token ledger
#[derive(Default)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
}

impl MockTokenRepository {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Internal {
                message: "Duplicate refresh token digest".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(token_hash).cloned())
    }

    async fn revoke_token(
        &self,
        token_hash: &str,
        replaced_by: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(token_hash) {
            Some(record) if !record.is_revoked() => {
                record.revoke(replaced_by);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked() {
                record.revoke(None);
                count += 1;
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::domain::entities::user::UserRole;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_user_repository_round_trip() {
        let repo = MockUserRepository::new();
        let user = User::new(
            "alice@mail.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        );

        repo.create(user.clone()).await.unwrap();
        assert!(repo
            .find_by_email("alice@mail.com")
            .await
            .unwrap()
            .is_some());
        assert_eq!(
            repo.increment_token_version(user.id).await.unwrap(),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_token_repository_conditional_revoke() {
        let repo = MockTokenRepository::new();
        let record = RefreshTokenRecord::new(
            Uuid::new_v4(),
            "digest".to_string(),
            Utc::now() + Duration::days(7),
        );

        repo.save_refresh_token(record).await.unwrap();
        assert!(repo.revoke_token("digest", None).await.unwrap());
        assert!(!repo.revoke_token("digest", None).await.unwrap());
    }
}
