use axum::Router;
use domain_ignition::{IgnitionService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(IgnitionService::new(state.engines.clone()))
}
