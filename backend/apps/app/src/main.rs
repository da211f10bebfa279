//! Application Entry Point
//!
//! Loads configuration, initializes tracing, and brings the store up.
//! Uses `anyhow` for startup errors, but library-level errors should use
//! `kernel::error::AppError`.

mod bootstrap;
mod config;
mod context;

use auth::UserRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::context::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,store=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let entities = bootstrap::connect_store(&config.store).await?;
    let context = AppContext::new(config, entities);

    let users = context.users()?;
    let admin = auth::models::UserName::new("admin")?;
    tracing::info!(
        admin_present = users.exists_by_username(&admin).await?,
        "Store ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::models::{Email, UserName};
    use auth::{ErrorKind, User};
    use store::{EntityRegistry, StoreConfig};

    fn memory_config() -> AppConfig {
        AppConfig {
            store: StoreConfig::new("memory://"),
        }
    }

    #[tokio::test]
    async fn test_context_exposes_users() {
        let config = memory_config();
        let entities = bootstrap::connect_store(&config.store).await.unwrap();
        let context = AppContext::new(config, entities);

        let users = context.users().unwrap();
        let user = User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        users.create(&user).await.unwrap();
        assert!(users.exists_by_username(&user.username).await.unwrap());
    }

    #[test]
    fn test_context_without_users() {
        let context = AppContext::new(memory_config(), EntityRegistry::default());
        let err = context.users().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
