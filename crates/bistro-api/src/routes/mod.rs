//! API routes

mod auth;
mod events;
mod feedback;
mod food_items;
mod health;
pub mod metrics;
mod reservations;
pub mod types;
mod users;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use bistro_auth::auth_middleware;
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let api = Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(food_items::routes())
        .merge(reservations::routes())
        .merge(feedback::routes())
        .merge(events::routes());

    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.issuer.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}
