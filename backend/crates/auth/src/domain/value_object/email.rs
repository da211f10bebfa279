//! Email Value Object
//!
//! Represents a structurally valid email address.
//! Basic validation only, and no lowercasing: the address is a
//! case-sensitive unique key.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_string();

        if email.is_empty() {
            return Err(AppError::invalid_input("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }

        Ok(Self(email))
    }

    /// Exactly one `@`, non-empty local and domain parts, no whitespace
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !email.chars().any(char::is_whitespace)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[test]
    fn test_case_preserved() {
        let email = Email::new("Test@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Test@Example.COM");
        assert_ne!(email, Email::new("test@example.com").unwrap());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let email = Email::new("  a@b  ").unwrap();
        assert_eq!(email.as_str(), "a@b");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
        assert!(Email::new("invalid").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("test@").is_err());
        assert!(Email::new("a@b@c").is_err());
        assert!(Email::new("a b@c").is_err());
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@example.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert!(Email::new(long).is_err());
    }
}
