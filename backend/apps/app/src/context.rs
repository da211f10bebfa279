//! Application Context
//!
//! Built once after the store is ready and passed by reference to whatever
//! needs the loaded entities.

use std::sync::Arc;

use auth::{USERS_ENTITY, UserStore};
use kernel::error::app_error::{AppError, AppResult};
use store::EntityRegistry;

use crate::config::AppConfig;

pub struct AppContext {
    pub config: AppConfig,
    pub entities: EntityRegistry,
}

impl AppContext {
    pub fn new(config: AppConfig, entities: EntityRegistry) -> Self {
        Self { config, entities }
    }

    /// Repository of the `users` entity
    pub fn users(&self) -> AppResult<Arc<UserStore>> {
        self.entities.get::<UserStore>(USERS_ENTITY).ok_or_else(|| {
            AppError::internal(format!("Entity `{}` is not loaded", USERS_ENTITY))
                .with_hint("Register UsersSchema with the store lifecycle")
        })
    }
}
