//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use platform::password::{HashedPassword, PasswordCredential, Salt};
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_name::UserName,
    user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};
use crate::infra::schema::{EMAIL_UNIQUE_CONSTRAINT, USERNAME_UNIQUE_CONSTRAINT};

macro_rules! select_user {
    ($filter:literal) => {
        concat!(
            r#"
            SELECT
                user_id,
                username,
                email,
                name,
                password_hash,
                password_salt,
                legacy_password_hash,
                session_token,
                status,
                role,
                settings,
                created,
                last_login
            FROM users
            WHERE "#,
            $filter
        )
    };
}

/// PostgreSQL-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, query: &'static str, value: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let credential = user.credential();

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                email,
                name,
                password_hash,
                password_salt,
                legacy_password_hash,
                session_token,
                status,
                role,
                settings,
                created,
                last_login
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.name.as_ref().map(DisplayName::as_str))
        .bind(credential.map(|c| c.hash().as_str()))
        .bind(credential.map(|c| c.salt().as_str()))
        .bind(user.legacy_password_hash.as_deref())
        .bind(user.session_token.as_deref())
        .bind(user.status.code())
        .bind(user.role.code())
        .bind(Json(&user.settings))
        .bind(user.created)
        .bind(user.last_login)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::debug!(user_id = %user.user_id, "User created");

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(select_user!("user_id = $1"))
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        self.fetch_one_by(select_user!("username = $1"), username.as_str())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_by(select_user!("email = $1"), email.as_str())
            .await
    }

    async fn exists_by_username(&self, username: &UserName) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let credential = user.credential();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                name = $4,
                password_hash = $5,
                password_salt = $6,
                legacy_password_hash = $7,
                session_token = $8,
                status = $9,
                role = $10,
                settings = $11,
                last_login = $12
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.name.as_ref().map(DisplayName::as_str))
        .bind(credential.map(|c| c.hash().as_str()))
        .bind(credential.map(|c| c.salt().as_str()))
        .bind(user.legacy_password_hash.as_deref())
        .bind(user.session_token.as_deref())
        .bind(user.status.code())
        .bind(user.role.code())
        .bind(Json(&user.settings))
        .bind(user.last_login)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

/// SQLSTATE 23505 becomes `UniquenessViolation` naming the field
fn map_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(USERNAME_UNIQUE_CONSTRAINT) => "username",
                Some(EMAIL_UNIQUE_CONSTRAINT) => "email",
                Some(other) => other,
                None => "unknown",
            };
            return AuthError::UniquenessViolation(field.to_string());
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    name: Option<String>,
    password_hash: Option<String>,
    password_salt: Option<String>,
    legacy_password_hash: Option<String>,
    session_token: Option<String>,
    status: String,
    role: String,
    settings: Json<Map<String, Value>>,
    created: DateTime<Utc>,
    last_login: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let credential = match (self.password_salt, self.password_hash) {
            (Some(salt), Some(hash)) => Some(PasswordCredential::from_parts(
                Salt::from_base64(salt)?,
                HashedPassword::from_base64(hash)?,
            )),
            (None, None) => None,
            _ => {
                return Err(AuthError::Internal(format!(
                    "User {} has a partial password credential",
                    self.user_id
                )));
            }
        };

        let status = UserStatus::from_code(&self.status)
            .ok_or_else(|| AuthError::Internal(format!("Invalid status: {}", self.status)))?;
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        let mut user = User::new(UserName::from_db(self.username), Email::from_db(self.email));
        user.user_id = UserId::from_uuid(self.user_id);
        user.name = self.name.map(DisplayName::from);
        user.legacy_password_hash = self.legacy_password_hash;
        user.session_token = self.session_token;
        user.status = status;
        user.role = role;
        user.settings = self.settings.0;
        user.created = self.created;
        user.last_login = self.last_login;

        Ok(user.with_credential(credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn row() -> UserRow {
        let now = Utc::now();
        UserRow {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: Some("Alice Smith".to_string()),
            password_hash: None,
            password_salt: None,
            legacy_password_hash: None,
            session_token: Some("token".to_string()),
            status: "deleted".to_string(),
            role: "admin".to_string(),
            settings: Json(Map::new()),
            created: now,
            last_login: now,
        }
    }

    #[test]
    fn test_row_without_credential() {
        let row = row();
        let id = row.user_id;
        let user = row.into_user().unwrap();

        assert_eq!(user.user_id.as_uuid(), &id);
        assert_eq!(user.status, UserStatus::Deleted);
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.session_token.as_deref(), Some("token"));
        assert!(!user.has_password());
    }

    #[test]
    fn test_row_with_credential() {
        let password = ClearTextPassword::new("correct horse");
        let credential = PasswordCredential::generate(&password).unwrap();

        let mut row = row();
        row.password_salt = Some(credential.salt().as_str().to_string());
        row.password_hash = Some(credential.hash().as_str().to_string());

        let user = row.into_user().unwrap();
        assert!(user.validate_password(&password));
    }

    #[test]
    fn test_partial_credential_rejected() {
        let mut row = row();
        row.password_salt = Some("c2FsdA==".to_string());

        assert!(matches!(row.into_user(), Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut row = row();
        row.role = "moderator".to_string();

        assert!(matches!(row.into_user(), Err(AuthError::Internal(_))));
    }

    /// Database error as Postgres reports a failed write
    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct FakeDbError {
        message: String,
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl FakeDbError {
        fn unique(constraint: Option<&'static str>) -> sqlx::Error {
            sqlx::Error::Database(Box::new(Self {
                message: "duplicate key value violates unique constraint".to_string(),
                unique: true,
                constraint,
            }))
        }
    }

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            &self.message
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(if self.unique { "23505" } else { "23503" }.into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.unique {
                sqlx::error::ErrorKind::UniqueViolation
            } else {
                sqlx::error::ErrorKind::ForeignKeyViolation
            }
        }
    }

    #[test]
    fn test_username_conflict_names_field() {
        let err = map_write_error(FakeDbError::unique(Some(USERNAME_UNIQUE_CONSTRAINT)));
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "username"));
    }

    #[test]
    fn test_email_conflict_names_field() {
        let err = map_write_error(FakeDbError::unique(Some(EMAIL_UNIQUE_CONSTRAINT)));
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "email"));
    }

    #[test]
    fn test_unknown_constraint_passed_through() {
        let err = map_write_error(FakeDbError::unique(Some("users_legacy_key")));
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "users_legacy_key"));

        let err = map_write_error(FakeDbError::unique(None));
        assert!(matches!(err, AuthError::UniquenessViolation(field) if field == "unknown"));
    }

    #[test]
    fn test_other_database_errors_kept() {
        let err = map_write_error(sqlx::Error::Database(Box::new(FakeDbError {
            message: "insert violates foreign key constraint".to_string(),
            unique: false,
            constraint: Some("users_parent_fkey"),
        })));
        assert!(matches!(err, AuthError::Database(_)));

        let err = map_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Database(sqlx::Error::RowNotFound)));
    }
}
