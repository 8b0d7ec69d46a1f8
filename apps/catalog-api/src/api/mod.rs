use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;
pub mod ignition;
pub mod products;

/// API routes without the `/api` prefix; `create_router` adds it.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/factory-tests", ignition::router(state))
}

/// `/ready` with the database check; merged next to the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
