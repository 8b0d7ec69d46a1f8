//! HTTP handlers for the factory ignition tests

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::IgnitionResult;
use crate::models::{
    Engine, EngineKind, EngineListing, EngineModel, EngineVariant, IgnitionReport, IgnitionStatus,
    Key, KeyKind, Manufacturer,
};
use crate::service::IgnitionService;

pub const TAG: &str = "Factory tests";

#[derive(OpenApi)]
#[openapi(
    paths(list_engines, start_car),
    components(
        schemas(
            Key,
            KeyKind,
            Manufacturer,
            Engine,
            EngineKind,
            EngineModel,
            EngineVariant,
            EngineListing,
            IgnitionReport,
            IgnitionStatus
        ),
        responses(NotFoundResponse)
    ),
    tags(
        (name = TAG, description = "Car ignition checks per engine configuration")
    )
)]
pub struct ApiDoc;

pub fn router(service: IgnitionService) -> Router {
    Router::new()
        .route("/engines", get(list_engines))
        .route("/{variant}", post(start_car))
        .with_state(Arc::new(service))
}

/// List the configured engines
#[utoipa::path(
    get,
    path = "/engines",
    tag = TAG,
    responses(
        (status = 200, description = "Engine catalog", body = Vec<EngineListing>)
    )
)]
async fn list_engines(State(service): State<Arc<IgnitionService>>) -> Json<Vec<EngineListing>> {
    Json(service.engines())
}

/// Try to start the demo car fitted with the given engine variant
#[utoipa::path(
    post,
    path = "/{variant}",
    tag = TAG,
    params(
        ("variant" = String, Path, description = "Engine configuration key: aspirated, electric or turbo")
    ),
    request_body = Key,
    responses(
        (status = 200, description = "Ignition outcome", body = IgnitionReport),
        (status = 404, response = NotFoundResponse),
        (status = 422, description = "Unknown manufacturer or key kind")
    )
)]
async fn start_car(
    State(service): State<Arc<IgnitionService>>,
    Path(variant): Path<String>,
    ValidatedJson(key): ValidatedJson<Key>,
) -> IgnitionResult<Json<IgnitionReport>> {
    let status = service.start_car(&variant, key)?;
    Ok(Json(status.into()))
}
