//! Store Error Types
//!
//! Failures of the connect/load sequence. They travel to the consumer
//! inside [`LifecycleEvent::Error`](crate::LifecycleEvent::Error) and are
//! never raised across the spawned task boundary.

use std::time::Duration;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Store-specific result type alias
pub type StoreResult<T> = Result<T, StoreConnectionError>;

#[derive(Debug, Error)]
pub enum StoreConnectionError {
    /// Driver could not establish the connection
    #[error("Failed to connect to store: {0}")]
    Connect(#[source] BoxError),

    /// Connection attempt exceeded the configured timeout
    #[error("Store connection timed out after {0:?}")]
    Timeout(Duration),

    /// An entity schema failed to load
    #[error("Failed to load entity `{entity}`: {source}")]
    EntityLoad {
        entity: String,
        #[source]
        source: BoxError,
    },

    /// Two schemas were registered under the same name
    #[error("Entity `{0}` registered more than once")]
    DuplicateEntity(String),

    /// Sequence stopped before reporting `End` or `Error`
    #[error("Store lifecycle ended without a terminal event")]
    Aborted,
}

impl StoreConnectionError {
    pub fn connect(err: impl Into<BoxError>) -> Self {
        Self::Connect(err.into())
    }

    pub fn entity_load(entity: impl Into<String>, err: impl Into<BoxError>) -> Self {
        Self::EntityLoad {
            entity: entity.into(),
            source: err.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::DuplicateEntity(_) => ErrorKind::Internal,
            _ => ErrorKind::StoreUnavailable,
        }
    }
}

impl From<StoreConnectionError> for AppError {
    fn from(err: StoreConnectionError) -> Self {
        AppError::new(err.kind(), err.to_string()).with_source(err)
    }
}
