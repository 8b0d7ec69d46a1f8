//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog service.
//!
//! - **[`errors`]**: `AppError` → uniform JSON error bodies with error codes
//! - **[`extractors`]**: validated JSON/query extractors and the integer id path extractor
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &server_config)?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &server_config, async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};
