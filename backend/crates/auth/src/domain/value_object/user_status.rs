//! User Status Value Object
//!
//! Deletion is logical: a deleted user keeps its row, its unique
//! username/email, and its credential.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Normal active account
    #[default]
    Active,

    /// Logically deleted account, cannot login
    Deleted,
}

impl UserStatus {
    /// Get string code for storage
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(UserStatus::from_code("active"), Some(UserStatus::Active));
        assert_eq!(UserStatus::from_code("deleted"), Some(UserStatus::Deleted));
        assert_eq!(UserStatus::from_code("disabled"), None);
        assert_eq!(UserStatus::Deleted.to_string(), "deleted");
    }

    #[test]
    fn test_can_login() {
        assert_eq!(UserStatus::default(), UserStatus::Active);
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Deleted.can_login());
    }
}
