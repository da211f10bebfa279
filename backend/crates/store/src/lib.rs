//! Store Lifecycle Module
//!
//! Connects to the backing store once at startup, loads every registered
//! entity schema, and reports progress as an ordered stream of
//! [`LifecycleEvent`]s. Dependent code waits for `End` (or aborts on
//! `Error`) before touching any entity.
//!
//! Structure:
//! - `domain/` - Addresses, events, entity registry, driver/schema traits
//! - `application/` - The lifecycle sequence and its event stream
//! - `infra/` - Postgres and in-memory drivers
//!
//! ## Guarantees
//! - `Start` is emitted exactly once, before anything else
//! - `EntityLoaded` follows registration order, once per entity
//! - Exactly one of `Error` / `End` ends the stream
//! - No automatic retry; the caller decides whether to start over

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::lifecycle::{EventStream, StoreLifecycle};
pub use config::{ConfigError, StoreConfig};
pub use domain::address::StoreAddress;
pub use domain::driver::{EntitySchema, LocalStoreDriver, StoreDriver};
pub use domain::event::{LifecycleEvent, LifecycleState};
pub use domain::registry::{EntityHandle, EntityRegistry};
pub use error::{StoreConnectionError, StoreResult};
pub use infra::memory::{MEMORY_SCHEME, MemoryConnection, MemoryStoreDriver};
pub use infra::postgres::PgStoreDriver;
