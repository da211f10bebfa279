//! User Name Value Object
//!
//! Unique login handle. Stored exactly as given: no case folding and no
//! Unicode normalization, so `Alice` and `alice` are different users.
//!
//! ## Invariants
//! - not empty and not whitespace-only
//! - at most [`USER_NAME_MAX_LENGTH`] characters

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(AppError::invalid_input("User name cannot be empty"));
        }

        let length = raw.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "User name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(raw))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserName {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        UserName::new(s)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
