//! Domain Layer
//!
//! Addresses, lifecycle events, the entity registry, and the traits that
//! drivers and entity schemas implement.

pub mod address;
pub mod driver;
pub mod event;
pub mod registry;
