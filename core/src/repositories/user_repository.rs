//! User repository trait defining the interface for credential storage.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for error handling;
//! implementations handle the actual database operations while keeping
//! the abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email address
    ///
    /// # Arguments
    /// * `email` - The normalized (trimmed, lowercased) email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - `AuthError::EmailAlreadyRegistered` on a
    ///   duplicate email, `Internal` on storage failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Atomically increment the user's token version by one
    ///
    /// The increment must be a single storage-level update so concurrent
    /// bumps never lose a step.
    ///
    /// # Returns
    /// * `Ok(Some(version))` - The new token version
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Storage error occurred
    async fn increment_token_version(&self, user_id: Uuid) -> Result<Option<i32>, DomainError>;
}

/// Mock implementation of UserRepository for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::errors::AuthError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository backed by an in-memory map
    pub struct MockUserRepository {
        pub users: Arc<RwLock<HashMap<Uuid, User>>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self {
                users: Arc::new(RwLock::new(HashMap::new())),
            }
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

        async fn increment_token_version(
            &self,
            user_id: Uuid,
        ) -> Result<Option<i32>, DomainError> {
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
}

#[cfg(test)]
mod tests {
    use super::mock::MockUserRepository;
    use super::*;
    use crate::domain::entities::user::UserRole;

    fn test_user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), UserRole::User)
    }

    #[tokio::test]
    async fn test_mock_create_and_find() {
        let repo = MockUserRepository::new();
        let user = test_user("alice@mail.com");

        let created = repo.create(user.clone()).await.unwrap();
        assert_eq!(created.id, user.id);

        let by_email = repo.find_by_email("alice@mail.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, user.id);

        let by_id = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "alice@mail.com");
    }

    #[tokio::test]
    async fn test_mock_duplicate_email() {
        let repo = MockUserRepository::new();
        repo.create(test_user("alice@mail.com")).await.unwrap();

        let result = repo.create(test_user("alice@mail.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Auth(crate::errors::AuthError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn test_mock_increment_token_version() {
        let repo = MockUserRepository::new();
        let user = repo.create(test_user("alice@mail.com")).await.unwrap();

        let version = repo.increment_token_version(user.id).await.unwrap();
        assert_eq!(version, Some(2));

        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.token_version, 2);
    }

    #[tokio::test]
    async fn test_mock_increment_missing_user() {
        let repo = MockUserRepository::new();
        let version = repo.increment_token_version(Uuid::new_v4()).await.unwrap();
        assert_eq!(version, None);
    }
}
