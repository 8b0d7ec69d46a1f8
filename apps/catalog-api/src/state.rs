//! Shared application state handed to route builders and the readiness probe.

use database::postgres::DatabaseConnection;
use domain_ignition::EngineCatalog;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Engine table for the factory ignition tests, fixed at startup
    pub engines: EngineCatalog,
}
