//! Driver and Schema Traits
//!
//! A [`StoreDriver`] turns a [`StoreConfig`] into a live connection. An
//! [`EntitySchema`] prepares one entity on that connection and hands back
//! the data-access object the rest of the process will use.

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::domain::registry::EntityHandle;
use crate::error::StoreResult;

/// Backing store driver
#[trait_variant::make(StoreDriver: Send)]
pub trait LocalStoreDriver {
    /// Shared connection (usually a pool) handed to every entity schema
    type Connection: Clone + Send + Sync + 'static;

    /// Establish the connection. No retry.
    async fn connect(&self, config: &StoreConfig) -> StoreResult<Self::Connection>;
}

/// Definition of one entity, loadable on connection type `C`
///
/// Object safe so that schemas of different entities can be registered
/// side by side.
#[async_trait]
pub trait EntitySchema<C>: Send + Sync
where
    C: Send + Sync + 'static,
{
    /// Name the entity is registered under (e.g. `"users"`)
    fn name(&self) -> &str;

    /// Prepare the entity on `connection` and return its data-access object
    async fn load(&self, connection: &C) -> StoreResult<EntityHandle>;
}
