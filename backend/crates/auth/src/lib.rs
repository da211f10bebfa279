//! Auth (User Credentials) Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository trait
//! - `infra/` - PostgreSQL and in-memory repositories, `users` entity schema
//!
//! ## Security Model
//! - Passwords hashed with PBKDF2-HMAC-SHA1 (10,000 rounds, 64-byte output)
//!   under a random 16-byte salt, see `platform::password`
//! - Salt and hash are only ever written together, by `User::set_password`
//! - Verification compares in constant time and never errors
//! - Username and email are unique and case-sensitive

pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use domain::entity::user::User;
pub use domain::repository::UserRepository;
pub use error::{AuthError, AuthResult};
pub use infra::{
    MemoryUserRepository, PgUserRepository, USERS_ENTITY, UserStore, UsersSchema,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::{
        display_name::*, email::*, user_id::*, user_name::*, user_role::*, user_status::*,
    };
}
