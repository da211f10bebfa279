//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{CryptoError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// A unique field (`username` or `email`) is already taken
    #[error("Value for `{0}` already exists")]
    UniquenessViolation(String),

    /// Input rejected by a value object or password policy
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Salt generation or key derivation failed
    #[error("Credential error: {0}")]
    Crypto(#[from] CryptoError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UniquenessViolation(_) => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::InvalidInput,
            AuthError::Crypto(_) => ErrorKind::Crypto,
            AuthError::Database(_) => ErrorKind::StoreUnavailable,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    ///
    /// Fatal kinds (store, crypto, internal) log at error level.
    pub fn log(&self) {
        if self.kind().is_fatal() {
            tracing::error!(kind = %self.kind(), error = %self, "Auth operation failed");
            return;
        }
        match self {
            AuthError::UniquenessViolation(field) => {
                tracing::warn!(field = %field, "Uniqueness violation");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            AuthError::Database(source) => AppError::new(kind, message).with_source(source),
            AuthError::Crypto(source) => AppError::new(kind, message).with_source(source),
            _ => AppError::new(kind, message),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => AuthError::Validation(err.message().to_string()),
            ErrorKind::NotFound => AuthError::UserNotFound,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}
