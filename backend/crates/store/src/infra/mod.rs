//! Infrastructure Layer
//!
//! Store drivers.

pub mod memory;
pub mod postgres;

pub use memory::{MemoryConnection, MemoryStoreDriver};
pub use postgres::PgStoreDriver;
