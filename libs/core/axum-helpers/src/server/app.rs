use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Wraps the API routes with documentation UIs and the common middleware stack.
///
/// - `apis` is nested under `/api` and must already carry its state
/// - `/swagger-ui`, `/redoc`, `/rapidoc` and `/scalar` serve `T::openapi()`,
///   the raw document lives at `/api-docs/openapi.json`
/// - unknown paths and methods get JSON error bodies
/// - a CORS layer is added only when `server_config.cors_allowed_origins` is non-empty
///
/// Health routes are not included; merge [`health_router`](super::health_router)
/// and the app's own readiness route into the result.
///
/// # Errors
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = create_cors_layer(&server_config.cors_allowed_origins).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
        )
    })?;

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    match cors {
        Some(layer) => {
            info!(origins = ?server_config.cors_allowed_origins, "CORS enabled");
            router = router.layer(layer);
        }
        None => info!("CORS disabled, no allowed origins configured"),
    }

    Ok(router.layer(CompressionLayer::new()))
}

/// Serves `router` until SIGINT/SIGTERM, then drains and cleans up.
///
/// In-flight requests get `server_config.shutdown_timeout` to finish. `cleanup`
/// runs afterwards under the same timeout, typically closing the database pool.
///
/// ```ignore
/// create_production_app(app, &config.server, async move {
///     if let Err(e) = db.close().await {
///         tracing::error!(error = %e, "Failed to close database pool");
///     }
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = server_config.shutdown_timeout;
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let signal_coordinator = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_coordinator.wait_for_signal().await })
        .into_future();
    tokio::pin!(serve);

    let serve_result = tokio::select! {
        result = &mut serve => result,
        _ = shutdown_rx.recv() => {
            match tokio::time::timeout(shutdown_timeout, &mut serve).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?shutdown_timeout, "In-flight requests did not finish in time, forcing shutdown");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = &serve_result {
        tracing::error!("Server encountered an error: {:?}", e);
    }

    info!(?shutdown_timeout, "Running cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(?shutdown_timeout, "Cleanup exceeded timeout"),
    }

    serve_result
}
