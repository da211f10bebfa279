//! Application Layer
//!
//! The connect/load sequence.

pub mod lifecycle;

pub use lifecycle::{EventStream, PostEntitiesHook, PreEntitiesHook, StoreLifecycle};
