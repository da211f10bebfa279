//! In-Memory Driver
//!
//! Always connects. Entity schemas written for [`MemoryConnection`] keep
//! their data in process memory; nothing survives a restart.

use crate::config::StoreConfig;
use crate::domain::address::StoreAddress;
use crate::domain::driver::StoreDriver;
use crate::error::StoreResult;

/// Address prefix the bootstrap maps to this driver
pub const MEMORY_SCHEME: &str = "memory:";

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStoreDriver;

#[derive(Debug, Clone)]
pub struct MemoryConnection {
    address: StoreAddress,
}

impl MemoryConnection {
    pub fn address(&self) -> &StoreAddress {
        &self.address
    }
}

impl StoreDriver for MemoryStoreDriver {
    type Connection = MemoryConnection;

    async fn connect(&self, config: &StoreConfig) -> StoreResult<MemoryConnection> {
        tracing::debug!("In-memory store connected");
        Ok(MemoryConnection {
            address: config.address.clone(),
        })
    }
}
