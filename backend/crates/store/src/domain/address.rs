//! Store Address
//!
//! URI-style location of the backing store (scheme, host, credentials,
//! database name). Only drivers interpret it.

use std::borrow::Cow;
use std::fmt;

/// `Display` and `Debug` mask the password; use [`as_str`](Self::as_str)
/// for the raw value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StoreAddress(String);

impl StoreAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address with the userinfo password replaced by `***`
    pub fn redacted(&self) -> Cow<'_, str> {
        let Some((scheme, rest)) = self.0.split_once("://") else {
            return Cow::Borrowed(&self.0);
        };
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return Cow::Borrowed(&self.0);
        };
        match userinfo.split_once(':') {
            Some((user, _)) => Cow::Owned(format!("{}://{}:***@{}", scheme, user, host)),
            None => Cow::Borrowed(&self.0),
        }
    }
}

impl From<String> for StoreAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl From<&str> for StoreAddress {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

impl fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreAddress").field(&self.redacted()).finish()
    }
}
