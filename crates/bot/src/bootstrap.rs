use std::sync::Arc;

use menubot_core::config::{AppConfig, ConfigError, LoadOptions};
use menubot_core::pricing::DeterministicPricingEngine;
use menubot_db::repositories::{SqlCatalogueRepository, SqlOrderRepository, SqlUserRepository};
use menubot_db::{connect_with_config, migrations, DbPool};
use thiserror::Error;
use tracing::info;

use crate::checkout::{CheckoutError, HostedCheckoutLink};
use crate::responder::{Responder, ResponderSettings};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub responder: Responder,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("checkout setup failed: {0}")]
    Checkout(#[from] CheckoutError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Connects, migrates and wires the responder for an already validated config.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let checkout = HostedCheckoutLink::from_config(&config.checkout)?;
    let responder = Responder::new(
        ResponderSettings::from_config(&config),
        Arc::new(SqlCatalogueRepository::new(db_pool.clone())),
        Arc::new(SqlOrderRepository::new(db_pool.clone())),
        Arc::new(SqlUserRepository::new(db_pool.clone())),
        Arc::new(DeterministicPricingEngine),
        Arc::new(checkout),
    );
    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        catalogue_id = %config.catalogue.id,
        "responder ready"
    );

    Ok(Application { config, db_pool, responder })
}
