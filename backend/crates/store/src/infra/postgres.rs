//! PostgreSQL Driver

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions as _, Connection as _, PgPool};

use crate::config::StoreConfig;
use crate::domain::driver::StoreDriver;
use crate::error::{StoreConnectionError, StoreResult};

/// Connects a `PgPool`; entity schemas receive a clone of the pool
///
/// One direct connection is opened first so an unreachable server fails
/// at once with the driver's own error. The pool itself connects lazily.
/// The lifecycle's `connect_timeout` bounds the whole attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgStoreDriver;

impl StoreDriver for PgStoreDriver {
    type Connection = PgPool;

    async fn connect(&self, config: &StoreConfig) -> StoreResult<PgPool> {
        let options = PgConnectOptions::from_str(config.address.as_str())
            .map_err(StoreConnectionError::connect)?;

        let connection = options
            .connect()
            .await
            .map_err(StoreConnectionError::connect)?;
        if let Err(err) = connection.close().await {
            tracing::debug!(error = %err, "Initial PostgreSQL connection did not close cleanly");
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);

        tracing::debug!(
            max_connections = config.max_connections,
            "PostgreSQL pool connected"
        );

        Ok(pool)
    }
}
