//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every crate in the workspace.

use serde::Serialize;

/// Error classification
///
/// Every domain error maps onto one of these kinds so that callers can
/// decide how to react (abort startup, reject a single user action, retry
/// the whole sequence) without knowing the originating crate.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Conflict;
/// assert_eq!(kind.as_str(), "Conflict");
/// assert!(!kind.is_fatal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Caller supplied a value that failed validation
    InvalidInput,
    /// Requested record does not exist
    NotFound,
    /// Write collides with existing state (e.g. unique index)
    Conflict,
    /// Random source or key derivation primitive failed
    Crypto,
    /// Backing store could not be reached or initialized
    StoreUnavailable,
    /// Operation did not finish within its deadline
    Timeout,
    /// Anything else
    Internal,
}

impl ErrorKind {
    /// Stable, human readable name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Crypto => "Crypto Failure",
            ErrorKind::StoreUnavailable => "Store Unavailable",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// Whether the error should abort the surrounding sequence
    ///
    /// Caller mistakes (bad input, missing record, duplicates) only fail the
    /// action that produced them.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorKind::Crypto
                | ErrorKind::StoreUnavailable
                | ErrorKind::Timeout
                | ErrorKind::Internal
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
