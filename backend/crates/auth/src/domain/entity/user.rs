//! User Entity
//!
//! Stored user record with its password credential.
//!
//! The salt/hash pair lives in a private `Option<PasswordCredential>`: both
//! halves are set together and only [`User::set_password`] writes them.
//! Nothing reconstructs the clear-text password.

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, CryptoError, PasswordCredential};
use serde_json::{Map, Value};

use crate::domain::value_object::{
    display_name::{DisplayName, NameParts},
    email::Email,
    user_id::UserId,
    user_name::UserName,
    user_role::UserRole,
    user_status::UserStatus,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique login handle (case-sensitive)
    pub username: UserName,
    /// Unique email address (case-sensitive)
    pub email: Email,
    /// Optional display name
    pub name: Option<DisplayName>,
    /// Hash from a previous scheme, kept for migration only
    pub legacy_password_hash: Option<String>,
    /// Opaque session token, unrelated to the credential
    pub session_token: Option<String>,
    pub status: UserStatus,
    pub role: UserRole,
    /// Free-form per-user settings
    pub settings: Map<String, Value>,
    pub created: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    credential: Option<PasswordCredential>,
}

impl User {
    /// Create a new user without a password
    pub fn new(username: UserName, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            name: None,
            legacy_password_hash: None,
            session_token: None,
            status: UserStatus::default(),
            role: UserRole::default(),
            settings: Map::new(),
            created: now,
            last_login: now,
            credential: None,
        }
    }

    /// Replace the credential with a fresh salt and hash of `password`
    ///
    /// On error the previous credential is left untouched.
    pub fn set_password(&mut self, password: &ClearTextPassword) -> Result<(), CryptoError> {
        self.credential = Some(PasswordCredential::generate(password)?);
        tracing::debug!(user_id = %self.user_id, "Password credential replaced");
        Ok(())
    }

    /// Whether `candidate` matches the stored credential
    ///
    /// `false` when no password has been set.
    pub fn validate_password(&self, candidate: &ClearTextPassword) -> bool {
        self.credential
            .as_ref()
            .is_some_and(|credential| credential.verify(candidate))
    }

    pub fn has_password(&self) -> bool {
        self.credential.is_some()
    }

    /// Stored salt/hash pair, for persistence
    pub fn credential(&self) -> Option<&PasswordCredential> {
        self.credential.as_ref()
    }

    /// Attach a credential loaded from the store
    pub(crate) fn with_credential(mut self, credential: Option<PasswordCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn set_name(&mut self, name: impl Into<DisplayName>) {
        self.name = Some(name.into());
    }

    /// First/last/other parts of the display name
    pub fn split_name(&self) -> Option<NameParts> {
        self.name.as_ref().map(DisplayName::split)
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        self.last_login = Utc::now();
    }

    /// Logical delete; the record stays in the store
    pub fn mark_deleted(&mut self) {
        self.status = UserStatus::Deleted;
    }

    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Insert or replace one setting, returning the previous value
    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.settings.insert(key.into(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::from_base64;
    use platform::password::{HASH_LENGTH, SALT_LENGTH};
    use serde_json::json;

    fn new_user() -> User {
        User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let user = new_user();
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.role, UserRole::User);
        assert!(user.settings.is_empty());
        assert_eq!(user.created, user.last_login);
        assert!(!user.has_password());
        assert!(user.legacy_password_hash.is_none());
    }

    #[test]
    fn test_correct_horse() {
        let mut user = new_user();
        user.set_password(&ClearTextPassword::new("correct horse"))
            .unwrap();

        assert!(user.validate_password(&ClearTextPassword::new("correct horse")));
        assert!(!user.validate_password(&ClearTextPassword::new("wrong")));

        let credential = user.credential().unwrap();
        assert!(!credential.salt().as_str().is_empty());
        assert!(!credential.hash().as_str().is_empty());
        assert_eq!(from_base64(credential.salt().as_str()).unwrap().len(), SALT_LENGTH);
        assert_eq!(from_base64(credential.hash().as_str()).unwrap().len(), HASH_LENGTH);
    }

    #[test]
    fn test_reset_changes_salt_and_hash() {
        let mut user = new_user();
        let password = ClearTextPassword::new("hunter2hunter2");

        user.set_password(&password).unwrap();
        let first = user.credential().cloned().unwrap();
        user.set_password(&password).unwrap();
        let second = user.credential().cloned().unwrap();

        assert_ne!(first.salt().as_str(), second.salt().as_str());
        assert_ne!(first.hash().as_str(), second.hash().as_str());
        assert!(user.validate_password(&password));
    }

    #[test]
    fn test_new_password_replaces_old() {
        let mut user = new_user();
        user.set_password(&ClearTextPassword::new("first-password"))
            .unwrap();
        user.set_password(&ClearTextPassword::new("second-password"))
            .unwrap();

        assert!(!user.validate_password(&ClearTextPassword::new("first-password")));
        assert!(user.validate_password(&ClearTextPassword::new("second-password")));
    }

    #[test]
    fn test_no_password_never_validates() {
        let user = new_user();
        assert!(!user.validate_password(&ClearTextPassword::new("")));
        assert!(!user.validate_password(&ClearTextPassword::new("anything")));
    }

    #[test]
    fn test_legacy_hash_not_consulted() {
        let mut user = new_user();
        user.legacy_password_hash = Some("legacy".to_string());
        assert!(!user.validate_password(&ClearTextPassword::new("legacy")));
    }

    #[test]
    fn test_debug_hides_credential() {
        let mut user = new_user();
        user.set_password(&ClearTextPassword::new("correct horse"))
            .unwrap();
        let hash = user.credential().unwrap().hash().as_str().to_string();
        assert!(!format!("{:?}", user).contains(&hash));
    }

    #[test]
    fn test_mark_deleted_is_logical() {
        let mut user = new_user();
        user.set_password(&ClearTextPassword::new("correct horse"))
            .unwrap();
        user.mark_deleted();

        assert_eq!(user.status, UserStatus::Deleted);
        assert!(!user.is_active());
        assert!(user.has_password());
        assert_eq!(user.username.as_str(), "alice");
    }

    #[test]
    fn test_split_name() {
        let mut user = new_user();
        assert!(user.split_name().is_none());

        user.set_name("Alice Beatrice Smith");
        let parts = user.split_name().unwrap();
        assert_eq!(parts.first, "Alice");
        assert_eq!(parts.last.as_deref(), Some("Smith"));
        assert_eq!(parts.other.as_deref(), Some("Beatrice"));
    }

    #[test]
    fn test_settings() {
        let mut user = new_user();
        assert!(user.set_setting("theme", json!("dark")).is_none());
        assert_eq!(user.setting("theme"), Some(&json!("dark")));
        assert_eq!(user.set_setting("theme", json!("light")), Some(json!("dark")));
    }

    #[test]
    fn test_record_login() {
        let mut user = new_user();
        let before = user.last_login;
        user.record_login();
        assert!(user.last_login >= before);
    }
}
