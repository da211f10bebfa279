//! `users` Entity Schema
//!
//! Loaded by the store lifecycle. On PostgreSQL it ensures the table and
//! its indexes exist; in memory it starts an empty repository.

use async_trait::async_trait;
use sqlx::PgPool;
use store::{EntityHandle, EntitySchema, MemoryConnection, StoreConnectionError, StoreResult};

use crate::infra::UserStore;
use crate::infra::memory::MemoryUserRepository;
use crate::infra::postgres::PgUserRepository;

/// Registry name of the users entity
pub const USERS_ENTITY: &str = "users";

pub(crate) const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Idempotent DDL, one statement per `;`
const USERS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id UUID PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    name TEXT,
    password_hash TEXT,
    password_salt TEXT,
    legacy_password_hash TEXT,
    session_token TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    role TEXT NOT NULL DEFAULT 'user',
    settings JSONB NOT NULL DEFAULT '{}'::jsonb,
    created TIMESTAMPTZ NOT NULL DEFAULT now(),
    last_login TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT users_username_key UNIQUE (username),
    CONSTRAINT users_email_key UNIQUE (email),
    CONSTRAINT users_username_not_blank CHECK (btrim(username) <> ''),
    CONSTRAINT users_email_not_blank CHECK (btrim(email) <> ''),
    CONSTRAINT users_status_check CHECK (status IN ('active', 'deleted')),
    CONSTRAINT users_role_check CHECK (role IN ('user', 'admin', 'root')),
    CONSTRAINT users_password_pair CHECK ((password_hash IS NULL) = (password_salt IS NULL))
);
CREATE INDEX IF NOT EXISTS users_status_idx ON users (status);
CREATE INDEX IF NOT EXISTS users_role_idx ON users (role)
"#;

/// Schema of the `users` entity; its handle holds a [`UserStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersSchema;

#[async_trait]
impl EntitySchema<PgPool> for UsersSchema {
    fn name(&self) -> &str {
        USERS_ENTITY
    }

    async fn load(&self, pool: &PgPool) -> StoreResult<EntityHandle> {
        for stmt in USERS_DDL.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s)
                .execute(pool)
                .await
                .map_err(|e| StoreConnectionError::entity_load(USERS_ENTITY, e))?;
        }

        tracing::info!(entity = USERS_ENTITY, "Users table ready");

        Ok(EntityHandle::new(UserStore::Postgres(
            PgUserRepository::new(pool.clone()),
        )))
    }
}

#[async_trait]
impl EntitySchema<MemoryConnection> for UsersSchema {
    fn name(&self) -> &str {
        USERS_ENTITY
    }

    async fn load(&self, connection: &MemoryConnection) -> StoreResult<EntityHandle> {
        tracing::info!(
            entity = USERS_ENTITY,
            address = %connection.address(),
            "In-memory users ready"
        );

        Ok(EntityHandle::new(UserStore::Memory(
            MemoryUserRepository::new(),
        )))
    }
}
