//! Process Configuration

use store::{ConfigError, StoreConfig};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
}

impl AppConfig {
    /// Read from the environment; `.env` must already be loaded
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: StoreConfig::from_env()?,
        })
    }
}
