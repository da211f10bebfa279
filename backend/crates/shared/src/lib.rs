//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the smallest shared vocabulary of the workspace:
//! - Common error types and result aliases
//! - Typed ID wrappers for stored entities
//!
//! Anything specific to credentials or to the store lifecycle lives in
//! its own crate.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
