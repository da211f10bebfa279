//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
///
/// `create` and `update` fail with `AuthError::UniquenessViolation` when
/// the username or email is already held by another user.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (exact, case-sensitive)
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Find user by email (exact, case-sensitive)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_username(&self, username: &UserName) -> AuthResult<bool>;

    /// Update user; `UserNotFound` if no row has its ID
    async fn update(&self, user: &User) -> AuthResult<()>;
}
