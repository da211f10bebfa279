//! Display Name Value Object
//!
//! Free-form person name with a best-effort first/last split.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

/// Result of [`DisplayName::split`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NameParts {
    pub first: String,
    /// Last word, when there are at least two
    pub last: Option<String>,
    /// Middle words joined by one space, when there are at least three
    pub other: Option<String>,
}

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split on runs of whitespace
    ///
    /// Leading and trailing whitespace is ignored. A blank name yields an
    /// empty `first` and no other parts.
    pub fn split(&self) -> NameParts {
        let words: Vec<&str> = self.0.split_whitespace().collect();

        match words.as_slice() {
            [] => NameParts::default(),
            [only] => NameParts {
                first: (*only).to_string(),
                ..NameParts::default()
            },
            [first, middle @ .., last] => NameParts {
                first: (*first).to_string(),
                last: Some((*last).to_string()),
                other: (!middle.is_empty()).then(|| middle.join(" ")),
            },
        }
    }
}

impl From<String> for DisplayName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for DisplayName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
