//! Store Configuration
//!
//! Read from the process environment (after `.env` has been loaded by the
//! binary).

use std::time::Duration;

use thiserror::Error;

use crate::domain::address::StoreAddress;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const DATABASE_CONNECT_TIMEOUT_SECS: &str = "DATABASE_CONNECT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Store connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Where to connect; passed to the driver untouched
    pub address: StoreAddress,
    /// Pool size for drivers that pool connections
    pub max_connections: u32,
    /// Upper bound on the connect step; `None` leaves it to the driver
    pub connect_timeout: Option<Duration>,
}

impl StoreConfig {
    pub fn new(address: impl Into<StoreAddress>) -> Self {
        Self {
            address: address.into(),
            max_connections: 5,
            connect_timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup(DATABASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL))?;
        let mut config = Self::new(address);

        if let Some(value) = lookup(DATABASE_MAX_CONNECTIONS) {
            let parsed = value.trim().parse::<u32>().ok().filter(|n| *n > 0);
            config.max_connections = parsed.ok_or(ConfigError::Invalid {
                var: DATABASE_MAX_CONNECTIONS,
                value,
            })?;
        }

        if let Some(value) = lookup(DATABASE_CONNECT_TIMEOUT_SECS) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: DATABASE_CONNECT_TIMEOUT_SECS,
                value: value.clone(),
            })?;
            config.connect_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[(DATABASE_URL, "memory://test")])).unwrap();
        assert_eq!(config.address.as_str(), "memory://test");
        assert_eq!(config.max_connections, 5);
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_missing_url() {
        let err = StoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_URL));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://localhost/app"),
            (DATABASE_MAX_CONNECTIONS, "12"),
            (DATABASE_CONNECT_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_values() {
        let err = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://localhost/app"),
            (DATABASE_MAX_CONNECTIONS, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: DATABASE_MAX_CONNECTIONS, .. }));

        let err = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://localhost/app"),
            (DATABASE_CONNECT_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
