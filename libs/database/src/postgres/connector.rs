use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect with the default pool settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connect, retrying with exponential backoff. `None` uses [`RetryConfig::default`].
///
/// Useful at startup, when the database container may still be booting.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let retry_config = retry_config.unwrap_or_default();
    let attempts = retry_config.max_attempts();

    info!(url = %config.redacted_url(), attempts, "Connecting to PostgreSQL");

    let options = config.into_connect_options();
    retry_with_backoff(|| connect_with_options(options.clone()), retry_config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed {
            attempts,
            reason: e.to_string(),
        })
}

pub async fn connect_with_retry(
    database_url: &str,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    connect_from_config_with_retry(PostgresConfig::new(database_url), retry_config).await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!(app = app_name, "Migrations up to date");
    Ok(())
}
