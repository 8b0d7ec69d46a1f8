//! PostgreSQL connectivity for the catalog service.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connection pool, migrations, health checks
//! - `config`: `core_config::FromEnv` implementations for the config types
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
