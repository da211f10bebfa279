//! In-Memory Repository Implementation
//!
//! Enforces the same username/email uniqueness as the PostgreSQL
//! constraints. Clones share one map.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

/// First unique field of `user` already held by a different user
fn conflicting_field(users: &HashMap<UserId, User>, user: &User) -> Option<&'static str> {
    let others = || users.values().filter(|u| u.user_id != user.user_id);

    if others().any(|u| u.username == user.username) {
        return Some("username");
    }
    if others().any(|u| u.email == user.email) {
        return Some("email");
    }
    None
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal(format!(
                "User {} already exists",
                user.user_id
            )));
        }
        if let Some(field) = conflicting_field(&users, user) {
            return Err(AuthError::UniquenessViolation(field.to_string()));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &UserName) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| &u.username == username))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if let Some(field) = conflicting_field(&users, user) {
            return Err(AuthError::UniquenessViolation(field.to_string()));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn user(username: &str, email: &str) -> User {
        User::new(UserName::new(username).unwrap(), Email::new(email).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryUserRepository::new();
        let mut alice = user("alice", "alice@example.com");
        alice
            .set_password(&ClearTextPassword::new("correct horse"))
            .unwrap();
        repo.create(&alice).await.unwrap();

        let found = repo
            .find_by_username(&alice.username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, alice.user_id);
        assert!(found.validate_password(&ClearTextPassword::new("correct horse")));

        assert!(repo.find_by_id(&alice.user_id).await.unwrap().is_some());
        assert!(repo.find_by_email(&alice.email).await.unwrap().is_some());
        assert!(repo.exists_by_username(&alice.username).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = MemoryUserRepository::new();
        repo.create(&user("alice", "a@example.com")).await.unwrap();

        let err = repo
            .create(&user("alice", "b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "username"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = MemoryUserRepository::new();
        repo.create(&user("alice", "a@example.com")).await.unwrap();

        let err = repo
            .create(&user("bob", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "email"));
    }

    #[tokio::test]
    async fn test_uniqueness_is_case_sensitive() {
        let repo = MemoryUserRepository::new();
        repo.create(&user("alice", "a@example.com")).await.unwrap();
        repo.create(&user("Alice", "A@example.com")).await.unwrap();

        assert_eq!(repo.len().await, 2);
        let lower = UserName::new("ALICE").unwrap();
        assert!(!repo.exists_by_username(&lower).await.unwrap());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = MemoryUserRepository::new();
        let mut alice = user("alice", "a@example.com");
        repo.create(&alice).await.unwrap();
        repo.create(&user("bob", "b@example.com")).await.unwrap();

        alice.mark_deleted();
        repo.update(&alice).await.unwrap();
        let stored = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert!(!stored.is_active());

        alice.email = Email::new("b@example.com").unwrap();
        let err = repo.update(&alice).await.unwrap_err();
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "email"));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = MemoryUserRepository::new();
        let err = repo
            .update(&user("ghost", "ghost@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
