//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/tasks` → task catalog, reference solving and submissions

use crate::routes::{health::health_routes, tasks::tasks_routes};
use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod tasks;

/// Builds the router mounted under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/tasks", tasks_routes())
        .with_state(app_state)
}
