//! Infrastructure Layer
//!
//! Repository implementations and the `users` entity schema.

pub mod memory;
pub mod postgres;
pub mod schema;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use schema::{USERS_ENTITY, UsersSchema};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// Data-access object registered under [`USERS_ENTITY`]
///
/// Which variant is present depends on the driver the lifecycle ran with.
#[derive(Debug, Clone)]
pub enum UserStore {
    Postgres(PgUserRepository),
    Memory(MemoryUserRepository),
}

impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        match self {
            Self::Postgres(repo) => repo.create(user).await,
            Self::Memory(repo) => repo.create(user).await,
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        match self {
            Self::Postgres(repo) => repo.find_by_id(user_id).await,
            Self::Memory(repo) => repo.find_by_id(user_id).await,
        }
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        match self {
            Self::Postgres(repo) => repo.find_by_username(username).await,
            Self::Memory(repo) => repo.find_by_username(username).await,
        }
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        match self {
            Self::Postgres(repo) => repo.find_by_email(email).await,
            Self::Memory(repo) => repo.find_by_email(email).await,
        }
    }

    async fn exists_by_username(&self, username: &UserName) -> AuthResult<bool> {
        match self {
            Self::Postgres(repo) => repo.exists_by_username(username).await,
            Self::Memory(repo) => repo.exists_by_username(username).await,
        }
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        match self {
            Self::Postgres(repo) => repo.update(user).await,
            Self::Memory(repo) => repo.update(user).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;
    use store::{LifecycleEvent, MemoryStoreDriver, StoreConfig, StoreLifecycle};

    #[tokio::test]
    async fn test_users_entity_through_lifecycle() {
        let mut events = StoreLifecycle::new(MemoryStoreDriver, StoreConfig::new("memory://"))
            .entity(UsersSchema)
            .begin();

        let mut names = Vec::new();
        let mut registry = None;
        while let Some(event) = events.recv().await {
            names.push(event.name());
            if let LifecycleEvent::End(loaded) = event {
                registry = Some(loaded);
            }
        }
        assert_eq!(names, vec!["start", "entityLoaded", "end"]);

        let users = registry
            .and_then(|r| r.get::<UserStore>(USERS_ENTITY))
            .unwrap();
        assert!(matches!(users.as_ref(), UserStore::Memory(_)));

        let mut user = User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        user.set_password(&ClearTextPassword::new("correct horse"))
            .unwrap();
        users.create(&user).await.unwrap();

        let stored = users
            .find_by_email(&user.email)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.validate_password(&ClearTextPassword::new("correct horse")));
        assert!(!stored.validate_password(&ClearTextPassword::new("wrong")));
    }

    #[test]
    fn test_user_store_debug() {
        let store = UserStore::Memory(MemoryUserRepository::default());
        assert!(format!("{:?}", store).starts_with("Memory("));
    }
}
